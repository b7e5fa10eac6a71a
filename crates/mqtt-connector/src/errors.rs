/*
 * SPDX-FileCopyrightText: Copyright (c) 2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
 * SPDX-License-Identifier: LicenseRef-NvidiaProprietary
 *
 * NVIDIA CORPORATION, its affiliates and licensors retain all intellectual
 * property and proprietary rights in and to this material, related
 * documentation and any modifications thereto. Any use, reproduction,
 * disclosure or distribution of this material and related documentation
 * without an express license agreement from NVIDIA CORPORATION or
 * its affiliates is strictly prohibited.
 */

// src/errors.rs
// Error types for the broker client.

use thiserror::Error;

// ConnectorError covers everything that can go wrong between us and
// the broker: request-channel failures from the async client, and
// connection-level failures surfaced by the event loop.
#[derive(Error, Debug)]
pub enum ConnectorError {
    #[error("MQTT client error: {0}")]
    ClientError(#[from] rumqttc::ClientError),

    #[error("MQTT connection error: {0}")]
    ConnectionError(#[from] rumqttc::ConnectionError),

    #[error("Invalid topic: {0}")]
    InvalidTopic(String),
}

impl ConnectorError {
    // is_connection_error reports whether this error came from the
    // broker connection itself rather than our side of the channel.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Self::ConnectionError(_))
    }
}

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
use connected_car::CloudError;
use mqtt_connector::ConnectorError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Malformed payload: expected at least {expected} fields, got {got}")]
    MalformedPayload { expected: usize, got: usize },

    #[error("Payload is not valid UTF-8")]
    PayloadNotUtf8,

    #[error("Could not serialize result: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Cloud(#[from] CloudError),

    #[error(transparent)]
    Connector(#[from] ConnectorError),
}

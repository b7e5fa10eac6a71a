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

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CloudError {
    #[error("Unknown region: {0}")]
    UnknownRegion(String),

    #[error("Authentication failed for account: {username}")]
    AuthenticationFailed { username: String },

    #[error("HTTP Error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected response from vehicle cloud: {0}")]
    UnexpectedResponse(String),

    #[error("Remote service {service} failed with status {status}")]
    RemoteServiceFailed { service: String, status: String },
}

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

//! Client for the connected-vehicle cloud API: per-region
//! authentication, vehicle enumeration, telemetry retrieval, and
//! remote service execution.

pub mod account;
pub mod errors;
pub mod models;
pub mod region;
pub mod traits;

pub use account::CloudConnector;
pub use errors::CloudError;
pub use models::{Credentials, RemoteService, VehicleTelemetry};
pub use region::Region;
pub use traits::{AccountConnector, VehicleAccount};

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

// Seams between the command dispatcher and the network. The bridge
// only talks to these traits; tests substitute in-memory accounts.

use async_trait::async_trait;

use crate::errors::CloudError;
use crate::models::{Credentials, RemoteService, VehicleTelemetry};
use crate::region::Region;

/// Trait for signing in to a vehicle cloud account, enabling test mocks.
#[async_trait]
pub trait AccountConnector: Send + Sync {
    /// Authenticate against the regional endpoint and return a handle
    /// to the account's vehicles.
    async fn sign_in(
        &self,
        credentials: &Credentials,
        region: Region,
    ) -> Result<Box<dyn VehicleAccount>, CloudError>;
}

/// An authenticated session against one account. Request-scoped: the
/// bridge signs in fresh for every command message.
#[async_trait]
pub trait VehicleAccount: Send + Sync {
    /// VINs of all vehicles the account can reach.
    async fn vehicle_vins(&self) -> Result<Vec<String>, CloudError>;

    /// Telemetry for one vehicle; None when the VIN is not in the
    /// account.
    async fn telemetry(&self, vin: &str) -> Result<Option<VehicleTelemetry>, CloudError>;

    /// Trigger a remote service and return the execution state the
    /// cloud reported (e.g. INITIATED, PENDING, EXECUTED).
    async fn execute_service(
        &self,
        vin: &str,
        service: RemoteService,
    ) -> Result<String, CloudError>;
}

impl std::fmt::Debug for dyn VehicleAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn VehicleAccount")
    }
}

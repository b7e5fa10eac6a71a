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

// Command execution: one authenticated cloud session per request, a
// remote service trigger or telemetry fetch, and a normalized outcome.
// Recoverable conditions (unknown command, unknown VIN) become result
// strings; authentication and transport failures propagate to the
// listener boundary.

use connected_car::{AccountConnector, Region, RemoteService, VehicleAccount};
use tracing::info;

use crate::command::{CommandKind, CommandRequest};
use crate::errors::BridgeError;

/// Result of one dispatched command. The two shapes map to different
/// sets of output topics, so the publisher pattern-matches.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// Single execution-state string (remote services, errors,
    /// unrecognized commands).
    ExecutionState(String),
    /// Full telemetry result of a status command. The documents are
    /// pre-serialized JSON, republished verbatim.
    VehicleStatus {
        properties: String,
        status: String,
        mileage: u64,
        active: bool,
    },
}

const INVALID_VIN: &str = "INVALID VIN";

/// Per-request command executor over an account connector seam.
pub struct CommandExecutor<'a> {
    connector: &'a dyn AccountConnector,
}

impl<'a> CommandExecutor<'a> {
    pub fn new(connector: &'a dyn AccountConnector) -> Self {
        Self { connector }
    }

    /// Match the command token and run the selected action. An
    /// unrecognized command is reported without touching the network.
    pub async fn dispatch(&self, request: &CommandRequest) -> Result<CommandOutcome, BridgeError> {
        match request.kind() {
            Some(kind) => self.dispatch_kind(kind, request).await,
            None => Ok(CommandOutcome::ExecutionState(format!(
                "invalid command: {}",
                request.command_token
            ))),
        }
    }

    /// Run a specific command, bypassing token matching. The status
    /// topic uses this to force a status fetch.
    pub async fn dispatch_kind(
        &self,
        kind: CommandKind,
        request: &CommandRequest,
    ) -> Result<CommandOutcome, BridgeError> {
        let region: Region = request.region_name.parse()?;
        let account = self.connector.sign_in(&request.credentials, region).await?;

        match kind {
            CommandKind::Status => self.vehicle_status(account.as_ref(), &request.vin).await,
            CommandKind::LightFlash => {
                self.remote_service(account.as_ref(), &request.vin, RemoteService::LightFlash)
                    .await
            }
            CommandKind::Lock => {
                self.remote_service(account.as_ref(), &request.vin, RemoteService::DoorLock)
                    .await
            }
            CommandKind::Unlock => {
                self.remote_service(account.as_ref(), &request.vin, RemoteService::DoorUnlock)
                    .await
            }
            CommandKind::AirConditioning => {
                self.remote_service(account.as_ref(), &request.vin, RemoteService::ClimateNow)
                    .await
            }
            CommandKind::Horn => {
                self.remote_service(account.as_ref(), &request.vin, RemoteService::HornBlow)
                    .await
            }
            CommandKind::ChargeNow => {
                self.remote_service(account.as_ref(), &request.vin, RemoteService::ChargeNow)
                    .await
            }
        }
    }

    // remote_service resolves the VIN among the account's vehicles and
    // triggers the service, reporting the state the cloud returned.
    async fn remote_service(
        &self,
        account: &dyn VehicleAccount,
        vin: &str,
        service: RemoteService,
    ) -> Result<CommandOutcome, BridgeError> {
        let vins = account.vehicle_vins().await?;
        if !vins.iter().any(|candidate| candidate == vin) {
            info!(
                vin,
                valid_vins = %vins.join(", "),
                "Could not find vehicle for VIN"
            );
            return Ok(CommandOutcome::ExecutionState(INVALID_VIN.to_string()));
        }

        let state = account.execute_service(vin, service).await?;
        Ok(CommandOutcome::ExecutionState(state))
    }

    // vehicle_status fetches full telemetry. An unknown VIN yields an
    // empty result document instead of an error.
    async fn vehicle_status(
        &self,
        account: &dyn VehicleAccount,
        vin: &str,
    ) -> Result<CommandOutcome, BridgeError> {
        match account.telemetry(vin).await? {
            Some(telemetry) => Ok(CommandOutcome::VehicleStatus {
                properties: serde_json::to_string_pretty(&telemetry.attributes)?,
                status: serde_json::to_string_pretty(&telemetry.status)?,
                mileage: telemetry.mileage,
                active: telemetry.active,
            }),
            None => {
                info!(vin, "No vehicle matched VIN for status request");
                Ok(CommandOutcome::VehicleStatus {
                    properties: "{}".to_string(),
                    status: "{}".to_string(),
                    mileage: 0,
                    active: false,
                })
            }
        }
    }
}

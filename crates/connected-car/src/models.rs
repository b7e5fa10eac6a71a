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

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

/// Account credentials, supplied per command message and never cached.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// One remotely triggerable vehicle service, with its wire code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteService {
    LightFlash,
    DoorLock,
    DoorUnlock,
    ClimateNow,
    HornBlow,
    ChargeNow,
}

impl RemoteService {
    /// serviceType value the execution endpoint expects.
    pub fn service_code(&self) -> &'static str {
        match self {
            Self::LightFlash => "LIGHT_FLASH",
            Self::DoorLock => "DOOR_LOCK",
            Self::DoorUnlock => "DOOR_UNLOCK",
            Self::ClimateNow => "CLIMATE_NOW",
            Self::HornBlow => "HORN_BLOW",
            Self::ChargeNow => "CHARGE_NOW",
        }
    }
}

impl fmt::Display for RemoteService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.service_code())
    }
}

/// Full telemetry for one vehicle: the static attribute document from
/// the vehicle listing plus the live status document.
#[derive(Debug, Clone)]
pub struct VehicleTelemetry {
    /// Raw static attributes (model, body type, equipment, ...).
    pub attributes: Value,
    /// Raw live status document (doors, windows, position, ...).
    pub status: Value,
    /// Odometer reading, zero when the status document omits it.
    pub mileage: u64,
    /// Whether the vehicle currently holds a connection to the cloud.
    pub active: bool,
}

// Wire shapes for the REST responses we consume. Everything we don't
// pick apart stays a raw Value so callers can republish it verbatim.

#[derive(Debug, Deserialize)]
pub(crate) struct VehicleListResponse {
    #[serde(default)]
    pub vehicles: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VehicleStatusResponse {
    #[serde(rename = "vehicleStatus")]
    pub vehicle_status: Value,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExecutionResponse {
    #[serde(rename = "executionStatus")]
    pub execution_status: ExecutionStatus,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExecutionStatus {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
}

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

// REST implementation of the account traits. One CloudConnector is
// built at startup and shared; every sign_in produces a fresh,
// request-scoped ConnectedAccount holding a bearer token.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use crate::errors::CloudError;
use crate::models::{
    Credentials, ExecutionResponse, RemoteService, TokenResponse, VehicleListResponse,
    VehicleStatusResponse, VehicleTelemetry,
};
use crate::region::Region;
use crate::traits::{AccountConnector, VehicleAccount};

const OAUTH_SCOPE: &str = "vehicle_data remote_services";

/// Connector that signs in against the regional REST endpoints.
#[derive(Clone)]
pub struct CloudConnector {
    http: reqwest::Client,
    // base_override replaces the regional API base. Test servers use
    // this; production always derives the base from the region.
    base_override: Option<String>,
}

impl Default for CloudConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl CloudConnector {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_override: None,
        }
    }

    /// Point the connector at a non-regional base URL.
    pub fn with_base_url(url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_override: Some(url.to_string().trim_end_matches('/').to_string()),
        }
    }

    fn api_base(&self, region: Region) -> String {
        match &self.base_override {
            Some(base) => base.clone(),
            None => region.api_base().to_string(),
        }
    }
}

#[async_trait]
impl AccountConnector for CloudConnector {
    async fn sign_in(
        &self,
        credentials: &Credentials,
        region: Region,
    ) -> Result<Box<dyn VehicleAccount>, CloudError> {
        let base = self.api_base(region);
        debug!(username = %credentials.username, %region, "Signing in to vehicle cloud");

        let response = self
            .http
            .post(format!("{base}/gcdm/oauth/token"))
            .form(&[
                ("grant_type", "password"),
                ("username", credentials.username.as_str()),
                ("password", credentials.password.as_str()),
                ("scope", OAUTH_SCOPE),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CloudError::AuthenticationFailed {
                username: credentials.username.clone(),
            });
        }

        let token: TokenResponse = response.json().await?;
        info!(username = %credentials.username, %region, "Signed in");

        Ok(Box::new(ConnectedAccount {
            http: self.http.clone(),
            base,
            access_token: token.access_token,
        }))
    }
}

/// An authenticated REST session for one account.
pub struct ConnectedAccount {
    http: reqwest::Client,
    base: String,
    access_token: String,
}

impl ConnectedAccount {
    async fn list_vehicles(&self) -> Result<Vec<Value>, CloudError> {
        let response = self
            .http
            .get(format!("{}/webapi/v1/user/vehicles", self.base))
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CloudError::UnexpectedResponse(format!(
                "vehicle listing returned {}",
                response.status()
            )));
        }

        let listing: VehicleListResponse = response.json().await?;
        Ok(listing.vehicles)
    }

    fn entry_vin(entry: &Value) -> Option<&str> {
        entry.get("vin").and_then(Value::as_str)
    }
}

#[async_trait]
impl VehicleAccount for ConnectedAccount {
    async fn vehicle_vins(&self) -> Result<Vec<String>, CloudError> {
        let vins = self
            .list_vehicles()
            .await?
            .iter()
            .filter_map(|entry| Self::entry_vin(entry).map(str::to_string))
            .collect();
        Ok(vins)
    }

    async fn telemetry(&self, vin: &str) -> Result<Option<VehicleTelemetry>, CloudError> {
        let Some(attributes) = self
            .list_vehicles()
            .await?
            .into_iter()
            .find(|entry| Self::entry_vin(entry) == Some(vin))
        else {
            return Ok(None);
        };

        let response = self
            .http
            .get(format!("{}/webapi/v1/user/vehicles/{vin}/status", self.base))
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CloudError::UnexpectedResponse(format!(
                "status for {vin} returned {}",
                response.status()
            )));
        }

        let status: VehicleStatusResponse = response.json().await?;
        let status = status.vehicle_status;

        let mileage = status.get("mileage").and_then(Value::as_u64).unwrap_or(0);
        let active = status
            .get("connectionStatus")
            .and_then(Value::as_str)
            .map(|s| s == "CONNECTED")
            .unwrap_or(false);

        Ok(Some(VehicleTelemetry {
            attributes,
            status,
            mileage,
            active,
        }))
    }

    async fn execute_service(
        &self,
        vin: &str,
        service: RemoteService,
    ) -> Result<String, CloudError> {
        info!(vin, %service, "Triggering remote service");
        let response = self
            .http
            .post(format!(
                "{}/webapi/v1/user/vehicles/{vin}/executeService",
                self.base
            ))
            .bearer_auth(&self.access_token)
            .form(&[("serviceType", service.service_code())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CloudError::RemoteServiceFailed {
                service: service.to_string(),
                status: response.status().to_string(),
            });
        }

        let execution: ExecutionResponse = response.json().await?;
        Ok(execution.execution_status.status)
    }
}

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
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

const DEFAULT_BROKER_HOST: &str = "192.168.0.11";
const DEFAULT_BROKER_PORT: u16 = 1883;
const DEFAULT_BASE_TOPIC: &str = "Mobility/MiniCooperSE";
const DEFAULT_SERVICE_STATE_TOPIC: &str = "Mobility/service/state";
const DEFAULT_CLIENT_ID: &str = "car-bridge";
const DEFAULT_KEEP_ALIVE_SECS: u64 = 60;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "Defaults::broker_host")]
    pub broker_host: String,
    #[serde(default = "Defaults::broker_port")]
    pub broker_port: u16,
    #[serde(default = "Defaults::base_topic")]
    pub base_topic: String,
    #[serde(default = "Defaults::service_state_topic")]
    pub service_state_topic: String,
    #[serde(default = "Defaults::client_id")]
    pub client_id: String,
    #[serde(default = "Defaults::keep_alive_secs")]
    pub keep_alive_secs: u64,
    /// Broker credentials; most home brokers run open.
    #[serde(default)]
    pub mqtt_username: Option<String>,
    #[serde(default)]
    pub mqtt_password: Option<String>,
}

pub struct Defaults;

impl Defaults {
    pub fn broker_host() -> String {
        DEFAULT_BROKER_HOST.to_string()
    }
    pub fn broker_port() -> u16 {
        DEFAULT_BROKER_PORT
    }
    pub fn base_topic() -> String {
        DEFAULT_BASE_TOPIC.to_string()
    }
    pub fn service_state_topic() -> String {
        DEFAULT_SERVICE_STATE_TOPIC.to_string()
    }
    pub fn client_id() -> String {
        DEFAULT_CLIENT_ID.to_string()
    }
    pub fn keep_alive_secs() -> u64 {
        DEFAULT_KEEP_ALIVE_SECS
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config file: {path}: {error}")]
    CouldNotRead { path: String, error: std::io::Error },
    #[error("Invalid TOML in config file: {path}: {error}")]
    InvalidToml {
        path: String,
        error: toml::de::Error,
    },
}

impl Default for Config {
    fn default() -> Self {
        Self {
            broker_host: Defaults::broker_host(),
            broker_port: Defaults::broker_port(),
            base_topic: Defaults::base_topic(),
            service_state_topic: Defaults::service_state_topic(),
            client_id: Defaults::client_id(),
            keep_alive_secs: Defaults::keep_alive_secs(),
            mqtt_username: None,
            mqtt_password: None,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let cfg = std::fs::read_to_string(path).map_err(|error| ConfigError::CouldNotRead {
            path: path.to_string_lossy().to_string(),
            error,
        })?;
        toml::from_str::<Self>(&cfg).map_err(|error| ConfigError::InvalidToml {
            path: path.to_string_lossy().to_string(),
            error,
        })
    }

    pub fn keep_alive(&self) -> Duration {
        Duration::from_secs(self.keep_alive_secs)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.broker_host, "192.168.0.11");
        assert_eq!(config.broker_port, 1883);
        assert_eq!(config.base_topic, "Mobility/MiniCooperSE");
        assert_eq!(config.service_state_topic, "Mobility/service/state");
        assert_eq!(config.keep_alive(), Duration::from_secs(60));
        assert!(config.mqtt_username.is_none());
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "broker_host = \"broker.lan\"\nbase_topic = \"Mobility/i3\""
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.broker_host, "broker.lan");
        assert_eq!(config.base_topic, "Mobility/i3");
        assert_eq!(config.broker_port, 1883);
        assert_eq!(config.service_state_topic, "Mobility/service/state");
    }

    #[test]
    fn test_load_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "broker_port = \"not a port").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidToml { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/bridge.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::CouldNotRead { .. }));
    }
}

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
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use connected_car::CloudConnector;
use mqtt_connector::{BrokerClient, ClientOptions, LastWillMessage};
use tracing::metadata::LevelFilter;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use crate::config::{Config, ConfigError};
use crate::listener::BridgeListener;
use crate::topics::TopicSet;

mod command;
mod config;
mod errors;
mod executor;
mod listener;
mod topics;

#[tokio::main]
async fn main() -> Result<(), eyre::Report> {
    let options = Options::parse();

    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy()
        .add_directive("rumqttc=warn".parse()?)
        .add_directive("rustls=warn".parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?)
        .add_directive("car_bridge=info".parse()?);

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(env_filter)
        .try_init()?;

    match options.command {
        Command::Run(run_command) => {
            let config: Config = run_command.try_into()?;
            run(config).await?;
        }
    }

    Ok(())
}

async fn run(config: Config) -> Result<(), eyre::Report> {
    tracing::info!(
        broker = %format!("{}:{}", config.broker_host, config.broker_port),
        base_topic = %config.base_topic,
        "Starting bridge"
    );

    let mut client_options = ClientOptions::default()
        .with_keep_alive(config.keep_alive())
        .with_last_will(LastWillMessage::retained(
            &config.service_state_topic,
            "Offline",
        ));
    if let (Some(username), Some(password)) = (&config.mqtt_username, &config.mqtt_password) {
        client_options = client_options.with_credentials(username, password);
    }

    let (client, events) = BrokerClient::connect(
        &config.client_id,
        &config.broker_host,
        config.broker_port,
        client_options,
    );

    let listener = BridgeListener::new(
        client.clone(),
        Arc::new(CloudConnector::new()),
        TopicSet::new(&config.base_topic),
        config.service_state_topic.clone(),
    );

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Could not install signal handler: {e}");
            std::future::pending::<()>().await;
        }
    };
    listener.run(events, shutdown).await;

    client.disconnect().await?;

    let stats = client.stats();
    tracing::info!(
        received = stats.total_received,
        dropped = stats.total_dropped,
        reconnects = stats.total_reconnects,
        "Bridge stopped"
    );

    Ok(())
}

#[derive(Parser)]
pub struct Options {
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Parser)]
pub enum Command {
    #[clap(about = "Start the MQTT vehicle command bridge")]
    Run(RunCommand),
}

#[derive(Parser)]
pub struct RunCommand {
    #[clap(long, short = 'f', help = "Path to TOML configuration file")]
    config_file: Option<PathBuf>,

    #[clap(long, help = "Hostname or IP of the MQTT broker")]
    pub broker_host: Option<String>,

    #[clap(long, help = "Port of the MQTT broker")]
    pub broker_port: Option<u16>,

    #[clap(long, help = "Base topic of the bridged vehicle")]
    pub base_topic: Option<String>,

    #[clap(long, help = "Retained presence topic of the bridge service")]
    pub service_state_topic: Option<String>,

    #[clap(long, help = "MQTT client identifier")]
    pub client_id: Option<String>,

    #[clap(long, env = "MQTT_USERNAME", help = "Username for the MQTT broker")]
    pub mqtt_username: Option<String>,

    #[clap(
        long,
        env = "MQTT_PASSWORD",
        hide_env_values = true,
        help = "Password for the MQTT broker"
    )]
    pub mqtt_password: Option<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum CommandError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl TryInto<Config> for RunCommand {
    type Error = CommandError;

    fn try_into(self) -> Result<Config, Self::Error> {
        let mut config = if let Some(config_path) = self.config_file {
            Config::load(&config_path)?
        } else {
            Config::default()
        };

        if let Some(broker_host) = self.broker_host {
            config.broker_host = broker_host;
        }
        if let Some(broker_port) = self.broker_port {
            config.broker_port = broker_port;
        }
        if let Some(base_topic) = self.base_topic {
            config.base_topic = base_topic;
        }
        if let Some(service_state_topic) = self.service_state_topic {
            config.service_state_topic = service_state_topic;
        }
        if let Some(client_id) = self.client_id {
            config.client_id = client_id;
        }
        if let Some(mqtt_username) = self.mqtt_username {
            config.mqtt_username = Some(mqtt_username);
        }
        if let Some(mqtt_password) = self.mqtt_password {
            config.mqtt_password = Some(mqtt_password);
        }

        Ok(config)
    }
}

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

// The bridge listener: owns the broker side of the bridge. Announces
// presence, (re)establishes subscriptions on every connection, and
// processes command messages strictly one at a time. Nothing that a
// single bad message causes may take the loop down; dispatch failures
// become published error results.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use connected_car::AccountConnector;
use mqtt_connector::{BrokerClient, BrokerEvent, ConnectorError, InboundMessage};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::command::{CommandKind, CommandRequest, redact_payload};
use crate::errors::BridgeError;
use crate::executor::{CommandExecutor, CommandOutcome};
use crate::topics::TopicSet;

// Acknowledgment published to the execution-state topic when a status
// request was answered on the telemetry topics.
const DELIVERED: &str = "DELIVERED";

/// Retained presence value for the service-state topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    Online,
    Offline,
}

impl ServiceState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "Online",
            Self::Offline => "Offline",
        }
    }
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait for the broker operations the listener needs, enabling test
/// mocks.
#[async_trait]
pub trait BridgeTransport: Send + Sync {
    async fn publish(&self, topic: &str, payload: String, retain: bool)
    -> Result<(), ConnectorError>;
    async fn subscribe(&self, topic: &str) -> Result<(), ConnectorError>;
}

#[async_trait]
impl BridgeTransport for BrokerClient {
    async fn publish(
        &self,
        topic: &str,
        payload: String,
        retain: bool,
    ) -> Result<(), ConnectorError> {
        BrokerClient::publish(self, topic, payload, retain).await
    }

    async fn subscribe(&self, topic: &str) -> Result<(), ConnectorError> {
        BrokerClient::subscribe(self, topic).await
    }
}

#[async_trait]
impl<T: BridgeTransport> BridgeTransport for Arc<T> {
    async fn publish(
        &self,
        topic: &str,
        payload: String,
        retain: bool,
    ) -> Result<(), ConnectorError> {
        T::publish(self, topic, payload, retain).await
    }

    async fn subscribe(&self, topic: &str) -> Result<(), ConnectorError> {
        T::subscribe(self, topic).await
    }
}

/// The bridge event loop.
pub struct BridgeListener<T: BridgeTransport> {
    transport: T,
    connector: Arc<dyn AccountConnector>,
    topics: TopicSet,
    service_state_topic: String,
}

impl<T: BridgeTransport> BridgeListener<T> {
    pub fn new(
        transport: T,
        connector: Arc<dyn AccountConnector>,
        topics: TopicSet,
        service_state_topic: String,
    ) -> Self {
        Self {
            transport,
            connector,
            topics,
            service_state_topic,
        }
    }

    /// Drain broker events until shutdown resolves or the event
    /// channel closes, then retract presence. Messages are handled
    /// sequentially: the next event is not taken until the current
    /// dispatch (including its HTTP round trips) finishes.
    pub async fn run(
        &self,
        mut events: mpsc::Receiver<BrokerEvent>,
        shutdown: impl Future<Output = ()>,
    ) {
        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown requested");
                    break;
                }
                maybe_event = events.recv() => match maybe_event {
                    Some(event) => self.handle_event(event).await,
                    None => {
                        warn!("Broker event channel closed");
                        break;
                    }
                },
            }
        }
        self.announce(ServiceState::Offline).await;
    }

    async fn handle_event(&self, event: BrokerEvent) {
        match event {
            BrokerEvent::Connected => self.on_connected().await,
            BrokerEvent::Message(message) => self.handle_message(message).await,
        }
    }

    // on_connected runs on every ConnAck: subscriptions do not survive
    // reconnects, and the retained presence value must be refreshed.
    async fn on_connected(&self) {
        for topic in [self.topics.command(), self.topics.get_status()] {
            if let Err(e) = self.transport.subscribe(&topic).await {
                warn!(topic, "Failed to subscribe: {e}");
            }
        }
        self.announce(ServiceState::Online).await;
    }

    /// Publish the retained presence value.
    pub async fn announce(&self, state: ServiceState) {
        info!(%state, topic = %self.service_state_topic, "Announcing service state");
        if let Err(e) = self
            .transport
            .publish(&self.service_state_topic, state.to_string(), true)
            .await
        {
            warn!("Failed to announce service state {state}: {e}");
        }
    }

    async fn handle_message(&self, message: InboundMessage) {
        let redacted = message
            .payload_utf8()
            .map(redact_payload)
            .unwrap_or_else(|| format!("<{} raw bytes>", message.payload.len()));
        info!(topic = %message.topic, payload = %redacted, "Handling command message");

        match self.execute(&message).await {
            Ok(outcome) => self.publish_outcome(outcome).await,
            Err(e) => {
                warn!(topic = %message.topic, "Command failed: {e}");
                self.publish_execution_state(format!("error: {e}")).await;
            }
        }
    }

    // execute parses and dispatches one message. The status topic
    // always fetches telemetry, whatever the command token says; the
    // command topic goes through token matching.
    async fn execute(&self, message: &InboundMessage) -> Result<CommandOutcome, BridgeError> {
        let payload = message.payload_utf8().ok_or(BridgeError::PayloadNotUtf8)?;
        let request = CommandRequest::parse(payload)?;
        let executor = CommandExecutor::new(self.connector.as_ref());

        if message.topic == self.topics.get_status() {
            executor.dispatch_kind(CommandKind::Status, &request).await
        } else {
            executor.dispatch(&request).await
        }
    }

    async fn publish_outcome(&self, outcome: CommandOutcome) {
        match outcome {
            CommandOutcome::ExecutionState(state) => {
                self.publish_execution_state(state).await;
            }
            CommandOutcome::VehicleStatus {
                properties,
                status,
                mileage,
                active,
            } => {
                self.publish_result(&self.topics.properties(), properties).await;
                self.publish_result(&self.topics.vehicle_state(), status).await;
                self.publish_result(&self.topics.mileage(), mileage.to_string())
                    .await;
                self.publish_result(&self.topics.active(), active.to_string())
                    .await;
                self.publish_execution_state(DELIVERED.to_string()).await;
            }
        }
    }

    async fn publish_execution_state(&self, state: String) {
        self.publish_result(&self.topics.execution_state(), state)
            .await;
    }

    async fn publish_result(&self, topic: &str, payload: String) {
        if let Err(e) = self.transport.publish(topic, payload, false).await {
            warn!(topic, "Failed to publish result: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use connected_car::{
        CloudError, Credentials, Region, RemoteService, VehicleAccount, VehicleTelemetry,
    };
    use serde_json::json;

    use super::*;

    #[derive(Default)]
    struct RecordingTransport {
        published: Mutex<Vec<(String, String, bool)>>,
        subscribed: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl BridgeTransport for RecordingTransport {
        async fn publish(
            &self,
            topic: &str,
            payload: String,
            retain: bool,
        ) -> Result<(), ConnectorError> {
            self.published
                .lock()
                .unwrap()
                .push((topic.to_string(), payload, retain));
            Ok(())
        }

        async fn subscribe(&self, topic: &str) -> Result<(), ConnectorError> {
            self.subscribed.lock().unwrap().push(topic.to_string());
            Ok(())
        }
    }

    #[derive(Clone)]
    struct StubAccount {
        vins: Vec<String>,
        execution_state: String,
    }

    #[async_trait]
    impl VehicleAccount for StubAccount {
        async fn vehicle_vins(&self) -> Result<Vec<String>, CloudError> {
            Ok(self.vins.clone())
        }

        async fn telemetry(&self, vin: &str) -> Result<Option<VehicleTelemetry>, CloudError> {
            if self.vins.iter().any(|candidate| candidate == vin) {
                Ok(Some(VehicleTelemetry {
                    attributes: json!({"model": "Cooper SE"}),
                    status: json!({"doorLockState": "LOCKED"}),
                    mileage: 4321,
                    active: true,
                }))
            } else {
                Ok(None)
            }
        }

        async fn execute_service(
            &self,
            _vin: &str,
            _service: RemoteService,
        ) -> Result<String, CloudError> {
            Ok(self.execution_state.clone())
        }
    }

    struct StubConnector {
        account: StubAccount,
        sign_ins: AtomicUsize,
    }

    #[async_trait]
    impl AccountConnector for StubConnector {
        async fn sign_in(
            &self,
            _credentials: &Credentials,
            _region: Region,
        ) -> Result<Box<dyn VehicleAccount>, CloudError> {
            self.sign_ins.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(self.account.clone()))
        }
    }

    const VIN: &str = "WMWXP7C50M3000002";

    fn listener(
        transport: Arc<RecordingTransport>,
        connector: Arc<StubConnector>,
    ) -> BridgeListener<Arc<RecordingTransport>> {
        BridgeListener::new(
            transport,
            connector,
            TopicSet::new("Mobility/MiniCooperSE"),
            "Mobility/service/state".to_string(),
        )
    }

    fn stub_connector() -> Arc<StubConnector> {
        Arc::new(StubConnector {
            account: StubAccount {
                vins: vec![VIN.to_string()],
                execution_state: "INITIATED".to_string(),
            },
            sign_ins: AtomicUsize::new(0),
        })
    }

    fn message(topic: &str, payload: &str) -> InboundMessage {
        InboundMessage {
            topic: topic.to_string(),
            payload: payload.as_bytes().to_vec(),
        }
    }

    #[tokio::test]
    async fn test_connected_subscribes_and_announces_online() {
        let transport = Arc::new(RecordingTransport::default());
        let listener = listener(Arc::clone(&transport), stub_connector());

        listener.handle_event(BrokerEvent::Connected).await;

        let subscribed = transport.subscribed.lock().unwrap();
        assert_eq!(
            subscribed.as_slice(),
            &["Mobility/MiniCooperSE/cmd", "Mobility/MiniCooperSE/get"]
        );

        let published = transport.published.lock().unwrap();
        assert_eq!(
            published.as_slice(),
            &[(
                "Mobility/service/state".to_string(),
                "Online".to_string(),
                true
            )]
        );
    }

    #[tokio::test]
    async fn test_command_message_publishes_execution_state() {
        let transport = Arc::new(RecordingTransport::default());
        let listener = listener(Arc::clone(&transport), stub_connector());

        listener
            .handle_message(message(
                "Mobility/MiniCooperSE/cmd",
                &format!("horn driver@example.com hunter2 rest_of_world {VIN}"),
            ))
            .await;

        let published = transport.published.lock().unwrap();
        assert_eq!(
            published.as_slice(),
            &[(
                "Mobility/MiniCooperSE/executionState".to_string(),
                "INITIATED".to_string(),
                false
            )]
        );
    }

    #[tokio::test]
    async fn test_malformed_payload_is_reported_without_network() {
        let transport = Arc::new(RecordingTransport::default());
        let connector = stub_connector();
        let listener = listener(Arc::clone(&transport), Arc::clone(&connector));

        listener
            .handle_message(message(
                "Mobility/MiniCooperSE/cmd",
                "horn driver@example.com hunter2 rest_of_world",
            ))
            .await;

        assert_eq!(connector.sign_ins.load(Ordering::SeqCst), 0);

        let published = transport.published.lock().unwrap();
        assert_eq!(published.len(), 1);
        let (topic, payload, retain) = &published[0];
        assert_eq!(topic, "Mobility/MiniCooperSE/executionState");
        assert!(payload.starts_with("error: Malformed payload"));
        assert!(!retain);
    }

    #[tokio::test]
    async fn test_get_topic_forces_status_dispatch() {
        let transport = Arc::new(RecordingTransport::default());
        let listener = listener(Arc::clone(&transport), stub_connector());

        // Command token says horn, but the status topic always fetches
        // telemetry.
        listener
            .handle_message(message(
                "Mobility/MiniCooperSE/get",
                &format!("horn driver@example.com hunter2 rest_of_world {VIN}"),
            ))
            .await;

        let published = transport.published.lock().unwrap();
        let topics: Vec<&str> = published.iter().map(|(t, _, _)| t.as_str()).collect();
        assert_eq!(
            topics,
            vec![
                "Mobility/MiniCooperSE/properties",
                "Mobility/MiniCooperSE/vehicleState",
                "Mobility/MiniCooperSE/mileage",
                "Mobility/MiniCooperSE/active",
                "Mobility/MiniCooperSE/executionState",
            ]
        );
        assert_eq!(published[2].1, "4321");
        assert_eq!(published[3].1, "true");
        assert_eq!(published[4].1, "DELIVERED");
        assert!(published.iter().all(|(_, _, retain)| !retain));
    }

    #[tokio::test]
    async fn test_run_announces_offline_on_shutdown() {
        let transport = Arc::new(RecordingTransport::default());
        let listener = listener(Arc::clone(&transport), stub_connector());

        let (_tx, rx) = mpsc::channel(1);
        listener.run(rx, async {}).await;

        let published = transport.published.lock().unwrap();
        assert_eq!(
            published.as_slice(),
            &[(
                "Mobility/service/state".to_string(),
                "Offline".to_string(),
                true
            )]
        );
    }

    #[tokio::test]
    async fn test_run_announces_offline_when_channel_closes() {
        let transport = Arc::new(RecordingTransport::default());
        let listener = listener(Arc::clone(&transport), stub_connector());

        let (tx, rx) = mpsc::channel(1);
        drop(tx);
        listener.run(rx, std::future::pending()).await;

        let published = transport.published.lock().unwrap();
        assert_eq!(published.last().unwrap().1, "Offline");
        assert!(published.last().unwrap().2);
    }

    #[test]
    fn test_service_state_rendering() {
        assert_eq!(ServiceState::Online.to_string(), "Online");
        assert_eq!(ServiceState::Offline.to_string(), "Offline");
    }
}

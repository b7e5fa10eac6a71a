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

// src/client.rs
// Broker client over rumqttc's AsyncClient/EventLoop split.
//
// The async client half is kept by BrokerClient for publishing and
// subscribing; the event loop half is moved into a background pump
// task that forwards broker events over a bounded channel. The pump
// is the only thing polling the connection, so it must never block on
// consumer work -- slow consumers cost dropped events, not a dead
// keepalive.

use std::sync::Arc;
use std::time::Duration;

use rumqttc::{AsyncClient, Event, LastWill, MqttOptions, Packet, QoS};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, info, warn};

use crate::errors::ConnectorError;
use crate::options::{
    ClientOptions, DEFAULT_EVENT_CHANNEL_CAPACITY, DEFAULT_KEEP_ALIVE,
    DEFAULT_MESSAGE_CHANNEL_CAPACITY,
};
use crate::stats::{ConnectionStats, ConnectionStatsTracker};

// How long the pump sleeps after a connection error before polling
// again. rumqttc reconnects on the next poll; without the pause a
// persistent failure becomes a busy loop.
const EVENT_LOOP_ERROR_BACKOFF: Duration = Duration::from_secs(1);

// InboundMessage is a publish packet received from the broker,
// reduced to what consumers need.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    // topic is the full MQTT topic the message arrived on.
    pub topic: String,
    // payload contains the raw message bytes.
    pub payload: Vec<u8>,
}

impl InboundMessage {
    // payload_utf8 decodes the payload as UTF-8 text, which is the
    // only payload shape the bridge protocols use.
    pub fn payload_utf8(&self) -> Option<&str> {
        std::str::from_utf8(&self.payload).ok()
    }
}

// BrokerEvent is what the pump forwards to the consumer.
#[derive(Debug, Clone)]
pub enum BrokerEvent {
    // Connected is emitted on every ConnAck, including reconnects.
    // Consumers re-establish subscriptions and retained state here.
    Connected,
    // Message is an inbound publish on a subscribed topic.
    Message(InboundMessage),
}

// BrokerClient is the publish/subscribe half of the connection.
// Cheap to clone; all clones share the same underlying connection.
#[derive(Clone)]
pub struct BrokerClient {
    client: AsyncClient,
    stats: Arc<ConnectionStatsTracker>,
}

impl BrokerClient {
    // connect builds the MQTT options from our ClientOptions, starts
    // the event pump, and hands back the client together with the
    // event receiver. The connection itself is established lazily by
    // the pump's first poll.
    pub fn connect(
        client_id: &str,
        host: &str,
        port: u16,
        options: ClientOptions,
    ) -> (Self, mpsc::Receiver<BrokerEvent>) {
        let mut mqtt_options = MqttOptions::new(client_id, host, port);
        mqtt_options.set_keep_alive(options.keep_alive.unwrap_or(DEFAULT_KEEP_ALIVE));

        if let Some(credentials) = &options.credentials {
            mqtt_options.set_credentials(&credentials.username, &credentials.password);
        }

        if let Some(will) = &options.last_will {
            mqtt_options.set_last_will(LastWill::new(
                &will.topic,
                will.payload.as_bytes(),
                QoS::AtLeastOnce,
                will.retain,
            ));
        }

        let request_capacity = options
            .message_channel_capacity
            .unwrap_or(DEFAULT_MESSAGE_CHANNEL_CAPACITY);
        let event_capacity = options
            .event_channel_capacity
            .unwrap_or(DEFAULT_EVENT_CHANNEL_CAPACITY);

        let (client, event_loop) = AsyncClient::new(mqtt_options, request_capacity);
        let (event_tx, event_rx) = mpsc::channel(event_capacity);

        let stats = Arc::new(ConnectionStatsTracker::new());
        tokio::spawn(pump_events(event_loop, event_tx, Arc::clone(&stats)));

        (Self { client, stats }, event_rx)
    }

    // publish sends a payload to a topic at QoS 1, with the retain
    // flag chosen per call since presence topics retain and result
    // topics don't.
    pub async fn publish(
        &self,
        topic: &str,
        payload: impl Into<Vec<u8>>,
        retain: bool,
    ) -> Result<(), ConnectorError> {
        if topic.is_empty() {
            return Err(ConnectorError::InvalidTopic(topic.to_string()));
        }
        debug!(topic, retain, "Publishing to broker");
        self.client
            .publish(topic, QoS::AtLeastOnce, retain, payload)
            .await?;
        Ok(())
    }

    // subscribe registers interest in a topic at QoS 1. Must be
    // re-done after every Connected event; the broker forgets
    // subscriptions across reconnects unless sessions persist.
    pub async fn subscribe(&self, topic: &str) -> Result<(), ConnectorError> {
        if topic.is_empty() {
            return Err(ConnectorError::InvalidTopic(topic.to_string()));
        }
        info!(topic, "Subscribing");
        self.client.subscribe(topic, QoS::AtLeastOnce).await?;
        Ok(())
    }

    // disconnect performs a clean disconnect. The registered last
    // will is NOT delivered on a clean disconnect, so callers that
    // want an Offline marker must publish it themselves first.
    pub async fn disconnect(&self) -> Result<(), ConnectorError> {
        self.client.disconnect().await?;
        Ok(())
    }

    // stats returns a snapshot of pump counters.
    pub fn stats(&self) -> ConnectionStats {
        self.stats.to_stats()
    }
}

// pump_events polls the rumqttc event loop forever, forwarding the
// events consumers care about. Exits when the consumer drops the
// receiver.
async fn pump_events(
    mut event_loop: rumqttc::EventLoop,
    event_tx: mpsc::Sender<BrokerEvent>,
    stats: Arc<ConnectionStatsTracker>,
) {
    loop {
        match event_loop.poll().await {
            Ok(Event::Incoming(Packet::ConnAck(ack))) => {
                info!(code = ?ack.code, "Broker connection acknowledged");
                stats.increment_connacks();
                if forward(&event_tx, BrokerEvent::Connected, &stats).is_err() {
                    break;
                }
            }
            Ok(Event::Incoming(Packet::Publish(publish))) => {
                debug!(topic = %publish.topic, bytes = publish.payload.len(), "Inbound publish");
                stats.increment_received();
                let message = InboundMessage {
                    topic: publish.topic.clone(),
                    payload: publish.payload.to_vec(),
                };
                if forward(&event_tx, BrokerEvent::Message(message), &stats).is_err() {
                    break;
                }
            }
            Ok(_) => {
                // Pings, acks and outgoing traffic; nothing to forward.
            }
            Err(e) => {
                warn!("MQTT event loop error: {e}");
                stats.increment_event_loop_errors();
                tokio::time::sleep(EVENT_LOOP_ERROR_BACKOFF).await;
            }
        }
    }
    debug!("Broker event pump stopped");
}

// forward try_sends an event to the consumer. A full channel drops
// the event (and counts it); a closed channel means the consumer is
// gone and the pump should stop.
fn forward(
    event_tx: &mpsc::Sender<BrokerEvent>,
    event: BrokerEvent,
    stats: &ConnectionStatsTracker,
) -> Result<(), ()> {
    match event_tx.try_send(event) {
        Ok(()) => Ok(()),
        Err(TrySendError::Full(event)) => {
            warn!(?event, "Broker event dropped (consumer channel full)");
            stats.increment_dropped();
            Ok(())
        }
        Err(TrySendError::Closed(_)) => Err(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inbound_message_utf8() {
        let message = InboundMessage {
            topic: "t".to_string(),
            payload: b"status user pass region vin".to_vec(),
        };
        assert_eq!(
            message.payload_utf8(),
            Some("status user pass region vin")
        );

        let binary = InboundMessage {
            topic: "t".to_string(),
            payload: vec![0xff, 0xfe],
        };
        assert_eq!(binary.payload_utf8(), None);
    }

    #[tokio::test]
    async fn test_publish_rejects_empty_topic() {
        let (client, _rx) = BrokerClient::connect(
            "test-client",
            "localhost",
            1883,
            ClientOptions::default(),
        );
        let err = client.publish("", "payload", false).await.unwrap_err();
        match err {
            ConnectorError::InvalidTopic(_) => {}
            other => panic!("Should be InvalidTopic, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_subscribe_rejects_empty_topic() {
        let (client, _rx) = BrokerClient::connect(
            "test-client",
            "localhost",
            1883,
            ClientOptions::default(),
        );
        let err = client.subscribe("").await.unwrap_err();
        assert!(matches!(err, ConnectorError::InvalidTopic(_)));
    }

    #[test]
    fn test_forward_reports_closed_channel() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let stats = ConnectionStatsTracker::new();
        assert!(forward(&tx, BrokerEvent::Connected, &stats).is_err());
    }

    #[test]
    fn test_forward_drops_on_full_channel() {
        let (tx, mut rx) = mpsc::channel(1);
        let stats = ConnectionStatsTracker::new();
        assert!(forward(&tx, BrokerEvent::Connected, &stats).is_ok());
        assert!(forward(&tx, BrokerEvent::Connected, &stats).is_ok());
        assert_eq!(stats.to_stats().total_dropped, 1);

        // The first event is still deliverable.
        assert!(matches!(rx.try_recv(), Ok(BrokerEvent::Connected)));
    }
}

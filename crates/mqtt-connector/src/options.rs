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

// src/options.rs
// Configuration options for the broker client.

use std::time::Duration;

// ClientOptions are optional parameters that can be passed to the
// client, all of which are supposed to have default fallbacks.
#[derive(Clone, Debug, Default)]
pub struct ClientOptions {
    // keep_alive sets the keepalive to use for MQTT broker connections.
    // Defaults to DEFAULT_KEEP_ALIVE.
    pub keep_alive: Option<Duration>,
    // message_channel_capacity is the number of *requests* the
    // underlying async client queue should buffer before applying
    // backpressure on publishers.
    // Defaults to DEFAULT_MESSAGE_CHANNEL_CAPACITY.
    pub message_channel_capacity: Option<usize>,
    // event_channel_capacity is the number of broker events (inbound
    // messages, connection notifications) buffered between the event
    // pump and the consumer before events are dropped.
    // Defaults to DEFAULT_EVENT_CHANNEL_CAPACITY.
    pub event_channel_capacity: Option<usize>,
    // credentials are optional username/password credentials that can
    // be provided to the MQTT server for authnz.
    pub credentials: Option<ClientCredentials>,
    // last_will is an optional message the broker will publish on our
    // behalf if the connection drops without a clean disconnect.
    pub last_will: Option<LastWillMessage>,
}

pub(crate) const DEFAULT_KEEP_ALIVE: Duration = Duration::from_secs(60);
pub(crate) const DEFAULT_MESSAGE_CHANNEL_CAPACITY: usize = 64;
pub(crate) const DEFAULT_EVENT_CHANNEL_CAPACITY: usize = 64;

impl ClientOptions {
    // Builder methods that consume and return Self
    pub fn with_keep_alive(mut self, keep_alive: Duration) -> Self {
        self.keep_alive = Some(keep_alive);
        self
    }

    pub fn with_message_channel_capacity(mut self, capacity: usize) -> Self {
        self.message_channel_capacity = Some(capacity);
        self
    }

    pub fn with_event_channel_capacity(mut self, capacity: usize) -> Self {
        self.event_channel_capacity = Some(capacity);
        self
    }

    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some(ClientCredentials {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    pub fn with_last_will(mut self, last_will: LastWillMessage) -> Self {
        self.last_will = Some(last_will);
        self
    }
}

// ClientCredentials are used for providing a username and password
// to the MQTT server.
#[derive(Clone, Debug)]
pub struct ClientCredentials {
    pub username: String,
    pub password: String,
}

// LastWillMessage is registered with the broker at connect time and
// delivered to subscribers if we disappear without disconnecting.
// Retained wills are how a presence topic keeps its last-known value
// across our crashes.
#[derive(Clone, Debug)]
pub struct LastWillMessage {
    pub topic: String,
    pub payload: String,
    pub retain: bool,
}

impl LastWillMessage {
    pub fn retained(topic: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            payload: payload.into(),
            retain: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_are_empty() {
        let opts = ClientOptions::default();
        assert!(opts.keep_alive.is_none());
        assert!(opts.message_channel_capacity.is_none());
        assert!(opts.event_channel_capacity.is_none());
        assert!(opts.credentials.is_none());
        assert!(opts.last_will.is_none());
    }

    #[test]
    fn test_builder_chain() {
        let opts = ClientOptions::default()
            .with_keep_alive(Duration::from_secs(30))
            .with_message_channel_capacity(16)
            .with_event_channel_capacity(8)
            .with_credentials("user", "pass")
            .with_last_will(LastWillMessage::retained("service/state", "Offline"));

        assert_eq!(opts.keep_alive, Some(Duration::from_secs(30)));
        assert_eq!(opts.message_channel_capacity, Some(16));
        assert_eq!(opts.event_channel_capacity, Some(8));
        assert_eq!(opts.credentials.as_ref().unwrap().username, "user");

        let will = opts.last_will.unwrap();
        assert_eq!(will.topic, "service/state");
        assert_eq!(will.payload, "Offline");
        assert!(will.retain);
    }
}

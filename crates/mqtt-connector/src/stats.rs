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

// src/stats.rs
// Connection statistics tracking for the event pump.
//
// Thread-safe atomic counters so the consumer can observe connection
// health without locks and without slowing down event forwarding.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

// ConnectionStats stores a snapshot of event pump statistics.
#[derive(Debug, Clone)]
pub struct ConnectionStats {
    // total_received is the count of inbound publish packets the pump
    // forwarded to the consumer since startup.
    pub total_received: usize,
    // total_dropped is the count of broker events dropped because the
    // consumer's event channel was full.
    pub total_dropped: usize,
    // total_event_loop_errors is the number of times a connection
    // error was encountered polling the event loop.
    pub total_event_loop_errors: usize,
    // total_reconnects is the number of ConnAcks seen after the first
    // one, i.e. how often the broker connection was re-established.
    pub total_reconnects: usize,
}

// ConnectionStatsTracker enables lock-free updates to connection
// statistics from the event pump task.
#[derive(Debug, Default)]
pub struct ConnectionStatsTracker {
    received_count: Arc<AtomicUsize>,
    dropped_count: Arc<AtomicUsize>,
    event_loop_errors: Arc<AtomicUsize>,
    connack_count: Arc<AtomicUsize>,
}

impl ConnectionStatsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    // increment_received records an inbound publish packet forwarded
    // to the consumer.
    pub fn increment_received(&self) {
        self.received_count.fetch_add(1, Ordering::Relaxed);
    }

    // increment_dropped records an event dropped because the consumer
    // channel returned TrySendError::Full.
    pub fn increment_dropped(&self) {
        self.dropped_count.fetch_add(1, Ordering::Relaxed);
    }

    // increment_event_loop_errors is updated any time the pump
    // encounters a connection error polling the event loop.
    pub fn increment_event_loop_errors(&self) {
        self.event_loop_errors.fetch_add(1, Ordering::Relaxed);
    }

    // increment_connacks records a connection acknowledgment from the
    // broker. The first one is the initial connect; the rest are
    // reconnects.
    pub fn increment_connacks(&self) {
        self.connack_count.fetch_add(1, Ordering::Relaxed);
    }

    // to_stats creates an immutable snapshot of current statistics.
    // Safe to call frequently as it only reads atomic values.
    pub fn to_stats(&self) -> ConnectionStats {
        ConnectionStats {
            total_received: self.received_count.load(Ordering::Relaxed),
            total_dropped: self.dropped_count.load(Ordering::Relaxed),
            total_event_loop_errors: self.event_loop_errors.load(Ordering::Relaxed),
            total_reconnects: self
                .connack_count
                .load(Ordering::Relaxed)
                .saturating_sub(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero() {
        let tracker = ConnectionStatsTracker::new();
        let stats = tracker.to_stats();
        assert_eq!(stats.total_received, 0);
        assert_eq!(stats.total_dropped, 0);
        assert_eq!(stats.total_event_loop_errors, 0);
        assert_eq!(stats.total_reconnects, 0);
    }

    #[test]
    fn test_reconnects_exclude_initial_connack() {
        let tracker = ConnectionStatsTracker::new();
        tracker.increment_connacks();
        assert_eq!(tracker.to_stats().total_reconnects, 0);

        tracker.increment_connacks();
        tracker.increment_connacks();
        assert_eq!(tracker.to_stats().total_reconnects, 2);
    }

    #[test]
    fn test_increment_paths() {
        let tracker = ConnectionStatsTracker::new();
        tracker.increment_received();
        tracker.increment_received();
        tracker.increment_dropped();
        tracker.increment_event_loop_errors();

        let stats = tracker.to_stats();
        assert_eq!(stats.total_received, 2);
        assert_eq!(stats.total_dropped, 1);
        assert_eq!(stats.total_event_loop_errors, 1);
    }
}

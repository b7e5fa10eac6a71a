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

// Topic namespace for one bridged vehicle. Everything hangs off the
// configured base topic; the retained presence topic lives in its own
// namespace and is configured separately.

/// The set of topics consumed and produced under one base topic.
#[derive(Debug, Clone)]
pub struct TopicSet {
    base: String,
}

impl TopicSet {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    /// Inbound: remote command execution requests.
    pub fn command(&self) -> String {
        format!("{}/cmd", self.base)
    }

    /// Inbound: status retrieval requests.
    pub fn get_status(&self) -> String {
        format!("{}/get", self.base)
    }

    /// Outbound: the execution state of the last command.
    pub fn execution_state(&self) -> String {
        format!("{}/executionState", self.base)
    }

    /// Outbound: static vehicle attribute document.
    pub fn properties(&self) -> String {
        format!("{}/properties", self.base)
    }

    /// Outbound: live vehicle status document.
    pub fn vehicle_state(&self) -> String {
        format!("{}/vehicleState", self.base)
    }

    /// Outbound: odometer reading.
    pub fn mileage(&self) -> String {
        format!("{}/mileage", self.base)
    }

    /// Outbound: cloud connectivity flag of the vehicle.
    pub fn active(&self) -> String {
        format!("{}/active", self.base)
    }
}

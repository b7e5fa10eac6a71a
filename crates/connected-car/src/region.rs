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
use std::str::FromStr;

use crate::errors::CloudError;

/// Geographic API endpoint selector for the vehicle cloud account.
/// Accounts only exist within one region, and each region runs its
/// own API deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    NorthAmerica,
    RestOfWorld,
    China,
}

impl Region {
    /// The canonical lowercase name used in inbound payloads and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::NorthAmerica => "north_america",
            Self::RestOfWorld => "rest_of_world",
            Self::China => "china",
        }
    }

    /// Base URL of the regional API deployment.
    pub fn api_base(&self) -> &'static str {
        match self {
            Self::NorthAmerica => "https://b2vapi.bmwgroup.us",
            Self::RestOfWorld => "https://b2vapi.bmwgroup.com",
            Self::China => "https://b2vapi.bmwgroup.cn:8592",
        }
    }

    pub fn valid_names() -> [&'static str; 3] {
        ["north_america", "rest_of_world", "china"]
    }
}

impl FromStr for Region {
    type Err = CloudError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "north_america" => Ok(Self::NorthAmerica),
            "rest_of_world" => Ok(Self::RestOfWorld),
            "china" => Ok(Self::China),
            other => Err(CloudError::UnknownRegion(other.to_string())),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

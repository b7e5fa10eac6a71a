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

// Inbound command payload: five whitespace-separated positional
// tokens, `<command> <username> <password> <region> <vin>`. Command
// recognition is case-insensitive substring containment against an
// explicit ordered table; the first matching entry wins.

use connected_car::Credentials;

use crate::errors::BridgeError;

/// The fixed set of vehicle commands the bridge understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Status,
    LightFlash,
    Lock,
    Unlock,
    AirConditioning,
    Horn,
    ChargeNow,
}

// The match table is ordered and the order is load-bearing: "lock" is
// a substring of "unlock", so Unlock MUST be tested first or every
// unlock request would lock the doors. Keep new entries aware of
// substring overlap with existing ones.
const COMMAND_TABLE: &[(&str, CommandKind)] = &[
    ("state", CommandKind::Status),
    ("status", CommandKind::Status),
    ("light", CommandKind::LightFlash),
    ("unlock", CommandKind::Unlock),
    ("lock", CommandKind::Lock),
    ("air", CommandKind::AirConditioning),
    ("horn", CommandKind::Horn),
    ("charge", CommandKind::ChargeNow),
];

impl CommandKind {
    /// First table entry whose needle is contained in the lowercased
    /// token, or None for an unrecognized command.
    pub fn match_token(token: &str) -> Option<Self> {
        let token = token.to_lowercase();
        COMMAND_TABLE
            .iter()
            .find(|(needle, _)| token.contains(needle))
            .map(|(_, kind)| *kind)
    }
}

/// One parsed command message.
#[derive(Debug, Clone)]
pub struct CommandRequest {
    /// The raw command token, kept for invalid-command reporting.
    pub command_token: String,
    pub credentials: Credentials,
    pub region_name: String,
    pub vin: String,
}

const EXPECTED_FIELDS: usize = 5;

impl CommandRequest {
    /// Parse the positional payload. Fewer than five tokens is
    /// malformed; surplus tokens are ignored, matching the positional
    /// indexing this protocol has always had.
    pub fn parse(payload: &str) -> Result<Self, BridgeError> {
        let fields: Vec<&str> = payload.split_whitespace().collect();
        if fields.len() < EXPECTED_FIELDS {
            return Err(BridgeError::MalformedPayload {
                expected: EXPECTED_FIELDS,
                got: fields.len(),
            });
        }
        Ok(Self {
            command_token: fields[0].to_string(),
            credentials: Credentials::new(fields[1], fields[2]),
            region_name: fields[3].to_string(),
            vin: fields[4].to_string(),
        })
    }

    pub fn kind(&self) -> Option<CommandKind> {
        CommandKind::match_token(&self.command_token)
    }
}

/// Payload rendering for logs: the password token is replaced so
/// credentials never reach the log stream.
pub fn redact_payload(payload: &str) -> String {
    payload
        .split_whitespace()
        .enumerate()
        .map(|(i, token)| if i == 2 { "***" } else { token })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlock_is_matched_before_lock() {
        assert_eq!(CommandKind::match_token("unlock"), Some(CommandKind::Unlock));
        assert_eq!(CommandKind::match_token("UNLOCK"), Some(CommandKind::Unlock));
        assert_eq!(
            CommandKind::match_token("please-unlock-now"),
            Some(CommandKind::Unlock)
        );
        assert_eq!(CommandKind::match_token("lock"), Some(CommandKind::Lock));
        assert_eq!(CommandKind::match_token("doorlock"), Some(CommandKind::Lock));
    }

    #[test]
    fn test_status_aliases() {
        assert_eq!(CommandKind::match_token("state"), Some(CommandKind::Status));
        assert_eq!(CommandKind::match_token("status"), Some(CommandKind::Status));
        assert_eq!(CommandKind::match_token("Status"), Some(CommandKind::Status));
    }

    #[test]
    fn test_remaining_commands() {
        assert_eq!(
            CommandKind::match_token("light-flash"),
            Some(CommandKind::LightFlash)
        );
        assert_eq!(
            CommandKind::match_token("air-conditioning"),
            Some(CommandKind::AirConditioning)
        );
        assert_eq!(CommandKind::match_token("horn"), Some(CommandKind::Horn));
        assert_eq!(
            CommandKind::match_token("charge-now"),
            Some(CommandKind::ChargeNow)
        );
    }

    #[test]
    fn test_unrecognized_command() {
        assert_eq!(CommandKind::match_token("frobnicate"), None);
    }

    #[test]
    fn test_parse_five_fields() {
        let request =
            CommandRequest::parse("horn driver@example.com hunter2 rest_of_world WMW123").unwrap();
        assert_eq!(request.command_token, "horn");
        assert_eq!(request.credentials.username, "driver@example.com");
        assert_eq!(request.credentials.password, "hunter2");
        assert_eq!(request.region_name, "rest_of_world");
        assert_eq!(request.vin, "WMW123");
        assert_eq!(request.kind(), Some(CommandKind::Horn));
    }

    #[test]
    fn test_parse_four_fields_is_malformed() {
        let err = CommandRequest::parse("horn driver@example.com hunter2 rest_of_world")
            .unwrap_err();
        match err {
            BridgeError::MalformedPayload { expected, got } => {
                assert_eq!(expected, 5);
                assert_eq!(got, 4);
            }
            other => panic!("Should be MalformedPayload, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_empty_payload_is_malformed() {
        assert!(matches!(
            CommandRequest::parse("  "),
            Err(BridgeError::MalformedPayload { got: 0, .. })
        ));
    }

    #[test]
    fn test_surplus_tokens_are_ignored() {
        let request = CommandRequest::parse(
            "lock driver@example.com hunter2 north_america WMW123 trailing junk",
        )
        .unwrap();
        assert_eq!(request.vin, "WMW123");
    }

    #[test]
    fn test_redact_payload_hides_password() {
        let redacted = redact_payload("horn driver@example.com hunter2 rest_of_world WMW123");
        assert_eq!(redacted, "horn driver@example.com *** rest_of_world WMW123");
        assert!(!redacted.contains("hunter2"));
    }
}

// crates/firebase-auth-config/src/multi_factor/tests.rs
// ============================================================================
// Module: Multi-Factor Config Tests
// Description: Unit tests for multi-factor validation and translation.
// Purpose: Validate factor mapping, TOTP bounds, and response tolerance.
// Dependencies: firebase-auth-config, serde_json
// ============================================================================

//! ## Overview
//! Covers the factor identifier tables, TOTP interval bounds, and the rule
//! that unknown server factor types and provider configs are dropped
//! instead of failing.

// ============================================================================
// SECTION: Lint Configuration
// ============================================================================

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    reason = "Test-only assertions use unwrap/expect for clarity."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::json;

use super::AuthFactorType;
use super::MAX_TOTP_ADJACENT_INTERVALS;
use super::MultiFactorProviderConfig;
use super::MultiFactorState;
use super::TotpProviderConfig;
use super::build_server_request;
use super::parse_server_response;
use super::validate;
use crate::error::AuthErrorCode;

// ============================================================================
// SECTION: Factor Tables
// ============================================================================

#[test]
fn factor_tables_are_inverse() {
    assert_eq!(AuthFactorType::Phone.server_type(), Some("PHONE_SMS"));
    assert_eq!(AuthFactorType::from_server("PHONE_SMS"), Some(AuthFactorType::Phone));
    assert_eq!(AuthFactorType::from_server("TOTP"), None);
    assert_eq!(AuthFactorType::from_client("email"), None);
}

// ============================================================================
// SECTION: Validation
// ============================================================================

#[test]
fn validate_rejects_unknown_keys() {
    let err = validate(&json!({"state": "ENABLED", "factors": []})).unwrap_err();
    assert_eq!(err.code(), AuthErrorCode::InvalidConfig);
    assert!(err.message().contains("\"factors\""));
}

#[test]
fn validate_rejects_unknown_state() {
    let err = validate(&json!({"state": "enabled"})).unwrap_err();
    assert_eq!(err.code(), AuthErrorCode::InvalidConfig);
}

#[test]
fn validate_rejects_unknown_factor_id() {
    let err = validate(&json!({"factorIds": ["phone", "email"]})).unwrap_err();
    assert_eq!(err.code(), AuthErrorCode::InvalidConfig);
    assert!(err.message().contains("\"email\""));
}

#[test]
fn validate_accepts_interval_bounds() {
    for intervals in [0, MAX_TOTP_ADJACENT_INTERVALS] {
        let config = validate(&json!({
            "providerConfigs": [{
                "state": "ENABLED",
                "totpProviderConfig": {"adjacentIntervals": intervals},
            }],
        }))
        .unwrap();
        let providers = config.provider_configs.unwrap();
        assert_eq!(providers[0].totp_provider_config.adjacent_intervals, Some(intervals));
    }
}

#[test]
fn validate_rejects_out_of_range_intervals_as_argument_error() {
    for intervals in [json!(-1), json!(11), json!(2.5), json!("5")] {
        let err = validate(&json!({
            "providerConfigs": [{
                "state": "ENABLED",
                "totpProviderConfig": {"adjacentIntervals": intervals},
            }],
        }))
        .unwrap_err();
        assert_eq!(err.code(), AuthErrorCode::InvalidArgument);
    }
}

#[test]
fn validate_requires_totp_provider_config() {
    let err = validate(&json!({"providerConfigs": [{"state": "ENABLED"}]})).unwrap_err();
    assert!(err.message().contains("must be defined"));
}

// ============================================================================
// SECTION: Translation
// ============================================================================

#[test]
fn build_maps_factor_ids_to_enabled_providers() {
    let request = build_server_request(&json!({"state": "ENABLED", "factorIds": ["phone"]})).unwrap();
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({"state": "ENABLED", "enabledProviders": ["PHONE_SMS"]})
    );
}

#[test]
fn build_keeps_empty_factor_list() {
    let request = build_server_request(&json!({"factorIds": []})).unwrap();
    assert_eq!(serde_json::to_value(&request).unwrap(), json!({"enabledProviders": []}));
}

#[test]
fn parse_drops_unknown_server_factors() {
    let config = parse_server_response(&json!({
        "state": "DISABLED",
        "enabledProviders": ["PHONE_SMS", "SOMETHING_NEW"],
    }))
    .unwrap();
    assert_eq!(config.state, MultiFactorState::Disabled);
    assert_eq!(config.factor_ids, vec![AuthFactorType::Phone]);
    assert!(config.provider_configs.is_empty());
}

#[test]
fn parse_drops_unknown_provider_configs() {
    let config = parse_server_response(&json!({
        "state": "ENABLED",
        "providerConfigs": [
            {"state": "ENABLED", "totpProviderConfig": {"adjacentIntervals": 3}},
            {"state": "ENABLED", "passkeyProviderConfig": {}},
        ],
    }))
    .unwrap();
    assert_eq!(
        config.provider_configs,
        vec![MultiFactorProviderConfig {
            state: MultiFactorState::Enabled,
            totp_provider_config: TotpProviderConfig {
                adjacent_intervals: Some(3),
            },
        }]
    );

    let config = parse_server_response(&json!({
        "state": "DISABLED",
        "providerConfigs": [{"state": "FUTURE_STATE", "totpProviderConfig": {}}],
    }))
    .unwrap();
    assert!(config.provider_configs.is_empty());
}

#[test]
fn parse_requires_state() {
    let err = parse_server_response(&json!({"enabledProviders": []})).unwrap_err();
    assert!(err.is_internal());
}

#[test]
fn to_json_uses_public_names() {
    let config = parse_server_response(&json!({
        "state": "ENABLED",
        "enabledProviders": ["PHONE_SMS"],
        "providerConfigs": [{"state": "ENABLED", "totpProviderConfig": {"adjacentIntervals": 5}}],
    }))
    .unwrap();
    assert_eq!(
        config.to_json(),
        json!({
            "state": "ENABLED",
            "factorIds": ["phone"],
            "providerConfigs": [{"state": "ENABLED", "totpProviderConfig": {"adjacentIntervals": 5}}],
        })
    );
}

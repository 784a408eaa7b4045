// crates/firebase-auth-config/src/sms_region/tests.rs
// ============================================================================
// Module: SMS Region Config Tests
// Description: Unit tests for SMS region policy validation and parsing.
// Purpose: Validate mutual exclusion and region list typing.
// Dependencies: firebase-auth-config, serde_json
// ============================================================================

//! ## Overview
//! Both variants are valid alone, even with empty lists; together they are
//! rejected.

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

use super::AllowByDefault;
use super::AllowlistOnly;
use super::SmsRegionConfig;
use super::build_server_request;
use super::parse_server_response;
use super::validate;
use crate::error::AuthErrorCode;

// ============================================================================
// SECTION: Validation
// ============================================================================

#[test]
fn both_variants_are_mutually_exclusive() {
    let err = validate(&json!({
        "allowByDefault": {"disallowedRegions": []},
        "allowlistOnly": {"allowedRegions": []},
    }))
    .unwrap_err();
    assert_eq!(err.code(), AuthErrorCode::InvalidConfig);
    assert!(err.message().contains("cannot have both"));
}

#[test]
fn either_variant_alone_accepts_empty_list() {
    let deny = validate(&json!({"allowByDefault": {"disallowedRegions": []}})).unwrap();
    assert_eq!(
        deny,
        Some(SmsRegionConfig::AllowByDefault(AllowByDefault {
            disallowed_regions: Some(Vec::new()),
        }))
    );
    let allow = validate(&json!({"allowlistOnly": {"allowedRegions": []}})).unwrap();
    assert_eq!(
        allow,
        Some(SmsRegionConfig::AllowlistOnly(AllowlistOnly {
            allowed_regions: Some(Vec::new()),
        }))
    );
}

#[test]
fn empty_config_means_no_change() {
    assert_eq!(validate(&json!({})).unwrap(), None);
}

#[test]
fn region_lists_must_hold_strings() {
    let err = validate(&json!({"allowByDefault": {"disallowedRegions": ["US", 1]}})).unwrap_err();
    assert_eq!(err.code(), AuthErrorCode::InvalidConfig);
    let err = validate(&json!({"allowlistOnly": {"allowedRegions": "US"}})).unwrap_err();
    assert_eq!(err.code(), AuthErrorCode::InvalidConfig);
}

#[test]
fn nested_keys_are_checked() {
    let err = validate(&json!({"allowlistOnly": {"disallowedRegions": []}})).unwrap_err();
    assert!(err.message().contains("SmsRegionConfig.allowlistOnly"));
    let err = validate(&json!({"denyAll": {}})).unwrap_err();
    assert!(err.message().contains("\"denyAll\""));
}

// ============================================================================
// SECTION: Translation
// ============================================================================

#[test]
fn wire_shape_matches_public_shape() {
    let public = json!({"allowlistOnly": {"allowedRegions": ["US", "CA"]}});
    let request = build_server_request(&public).unwrap().unwrap();
    assert_eq!(serde_json::to_value(&request).unwrap(), public);
    let parsed = parse_server_response(&public).unwrap().unwrap();
    assert_eq!(parsed.to_json(), public);
}

#[test]
fn parse_tolerates_empty_response() {
    assert_eq!(parse_server_response(&json!({})).unwrap(), None);
    assert!(parse_server_response(&json!([])).unwrap_err().is_internal());
}

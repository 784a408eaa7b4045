// crates/firebase-auth-config/src/tenant/tests.rs
// ============================================================================
// Module: Tenant Config Tests
// Description: Unit tests for tenant request composition and parsing.
// Purpose: Validate flattening, test phone number clearing, and masks.
// Dependencies: firebase-auth-config, serde_json
// ============================================================================

//! ## Overview
//! Tenant bodies mix flattened email sign-in flags with nested configs;
//! `testPhoneNumbers` is replaced as a whole on update.

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

use super::build_server_request;
use super::parse_server_response;
use super::tenant_id_from_resource_name;
use super::validate;
use super::validate_tenant_id;
use crate::email_sign_in::EmailSignInConfig;
use crate::error::AuthErrorCode;
use crate::translate::RequestMode;

// ============================================================================
// SECTION: Identity
// ============================================================================

#[test]
fn tenant_id_comes_from_trailing_segment() {
    assert_eq!(
        tenant_id_from_resource_name("projects/p/tenants/TENANT-1").as_deref(),
        Some("TENANT-1")
    );
    assert_eq!(tenant_id_from_resource_name("projects/p/tenants/"), None);
    assert_eq!(tenant_id_from_resource_name("projects/p"), None);
}

#[test]
fn tenant_id_must_be_non_empty_string() {
    assert_eq!(validate_tenant_id(&json!("t-1")).unwrap(), "t-1");
    for bad in [json!(""), json!(7), json!(null)] {
        assert_eq!(validate_tenant_id(&bad).unwrap_err().code(), AuthErrorCode::InvalidTenantId);
    }
}

// ============================================================================
// SECTION: Validation
// ============================================================================

#[test]
fn unknown_keys_name_the_request() {
    let err = validate(&json!({"name": "x"}), RequestMode::Create).unwrap_err();
    assert_eq!(err.code(), AuthErrorCode::InvalidArgument);
    assert!(err.message().contains("CreateTenantRequest"));
    let err = validate(&json!({"displayName": ""}), RequestMode::Update).unwrap_err();
    assert!(err.message().contains("UpdateTenantRequest.displayName"));
}

#[test]
fn null_test_phone_numbers_clear_only_on_update() {
    let options = validate(&json!({"testPhoneNumbers": null}), RequestMode::Update).unwrap();
    assert_eq!(options.test_phone_numbers.map(|numbers| numbers.len()), Some(0));
    let err = validate(&json!({"testPhoneNumbers": null}), RequestMode::Create).unwrap_err();
    assert_eq!(err.code(), AuthErrorCode::InvalidArgument);
}

#[test]
fn nested_errors_come_from_owning_translator() {
    let err = validate(&json!({"multiFactorConfig": {"state": "ON"}}), RequestMode::Create)
        .unwrap_err();
    assert_eq!(err.code(), AuthErrorCode::InvalidConfig);
    assert!(err.message().contains("MultiFactorConfig.state"));
    let err = validate(&json!({"testPhoneNumbers": {"+1650555": "12345"}}), RequestMode::Create)
        .unwrap_err();
    assert_eq!(err.code(), AuthErrorCode::InvalidTestingPhoneNumber);
}

// ============================================================================
// SECTION: Requests
// ============================================================================

#[test]
fn email_sign_in_is_flattened_and_inverted() {
    let request = build_server_request(
        &json!({
            "displayName": "Tenant",
            "emailSignInConfig": {"enabled": true, "passwordRequired": false},
            "anonymousSignInEnabled": true,
        }),
        RequestMode::Create,
    )
    .unwrap();
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({
            "displayName": "Tenant",
            "allowPasswordSignup": true,
            "enableEmailLinkSignin": true,
            "enableAnonymousUser": true,
        })
    );
}

#[test]
fn update_mask_treats_test_phone_numbers_as_terminal() {
    let request = build_server_request(
        &json!({
            "testPhoneNumbers": {"+16505550101": "123456"},
            "multiFactorConfig": {"state": "ENABLED", "factorIds": ["phone"]},
        }),
        RequestMode::Update,
    )
    .unwrap();
    assert_eq!(
        request.update_mask(),
        vec![
            "mfaConfig.enabledProviders".to_string(),
            "mfaConfig.state".to_string(),
            "testPhoneNumbers".to_string(),
        ]
    );
}

#[test]
fn cleared_test_phone_numbers_are_sent_empty() {
    let request =
        build_server_request(&json!({"testPhoneNumbers": null}), RequestMode::Update).unwrap();
    assert_eq!(serde_json::to_value(&request).unwrap(), json!({"testPhoneNumbers": {}}));
    assert_eq!(request.update_mask(), vec!["testPhoneNumbers".to_string()]);
}

// ============================================================================
// SECTION: Responses
// ============================================================================

#[test]
fn parse_fills_defaults() {
    let tenant = parse_server_response(&json!({"name": "projects/p/tenants/t-1"})).unwrap();
    assert_eq!(tenant.tenant_id, "t-1");
    assert_eq!(tenant.email_sign_in_config, EmailSignInConfig::disabled());
    assert!(!tenant.anonymous_sign_in_enabled);
    assert_eq!(
        tenant.to_json(),
        json!({
            "tenantId": "t-1",
            "emailSignInConfig": {"enabled": false, "passwordRequired": true},
            "anonymousSignInEnabled": false,
        })
    );
}

#[test]
fn parse_reads_nested_configs() {
    let tenant = parse_server_response(&json!({
        "name": "projects/p/tenants/t-2",
        "displayName": "Two",
        "allowPasswordSignup": true,
        "enableEmailLinkSignin": true,
        "mfaConfig": {"state": "ENABLED", "enabledProviders": ["PHONE_SMS"]},
        "testPhoneNumbers": {"+16505550101": "123456"},
        "emailPrivacyConfig": {"enableImprovedEmailPrivacy": true},
    }))
    .unwrap();
    let json = tenant.to_json();
    assert_eq!(json["emailSignInConfig"], json!({"enabled": true, "passwordRequired": false}));
    assert_eq!(json["multiFactorConfig"]["factorIds"], json!(["phone"]));
    assert_eq!(json["testPhoneNumbers"], json!({"+16505550101": "123456"}));
    assert_eq!(json["emailPrivacyConfig"], json!({"enableImprovedEmailPrivacy": true}));
}

#[test]
fn parse_treats_null_test_phone_numbers_as_empty() {
    let tenant = parse_server_response(&json!({
        "name": "projects/p/tenants/t-3",
        "testPhoneNumbers": null,
    }))
    .unwrap();
    assert_eq!(tenant.test_phone_numbers.map(|numbers| numbers.len()), Some(0));
}

#[test]
fn parse_requires_resource_name() {
    assert!(parse_server_response(&json!({"displayName": "x"})).unwrap_err().is_internal());
    assert!(
        parse_server_response(&json!({"name": "projects/p/tenants/t", "mfaConfig": {}}))
            .unwrap_err()
            .is_internal()
    );
}

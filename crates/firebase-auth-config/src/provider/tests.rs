// crates/firebase-auth-config/src/provider/tests.rs
// ============================================================================
// Module: Auth Provider Dispatch Tests
// Description: Unit tests for provider routing and list filters.
// Purpose: Validate prefix routing and paging bounds.
// Dependencies: firebase-auth-config, serde_json
// ============================================================================

//! ## Overview
//! Routing is decided purely by provider ID prefix; list filters enforce the
//! page-size ceiling and a non-empty page token.

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

use super::AuthProviderKind;
use super::AuthProviderRequest;
use super::MAX_LIST_PROVIDER_CONFIGS_PAGE_SIZE;
use super::build_create_request;
use super::build_list_request;
use super::build_update_request;
use super::parse_server_response;
use crate::error::AuthErrorCode;

// ============================================================================
// SECTION: Routing
// ============================================================================

#[test]
fn kind_follows_prefix() {
    assert_eq!(AuthProviderKind::from_provider_id("saml.a"), Some(AuthProviderKind::Saml));
    assert_eq!(AuthProviderKind::from_provider_id("oidc.a"), Some(AuthProviderKind::Oidc));
    assert_eq!(AuthProviderKind::from_provider_id("google.com"), None);
    assert_eq!(AuthProviderKind::Saml.collection(), "inboundSamlConfigs");
    assert_eq!(AuthProviderKind::Oidc.collection(), "oauthIdpConfigs");
}

#[test]
fn create_routes_to_oidc() {
    let request = build_create_request(&json!({
        "providerId": "oidc.provider",
        "clientId": "CLIENT_ID",
        "issuer": "https://oidc.example.com",
    }))
    .unwrap();
    assert_eq!(request.kind(), AuthProviderKind::Oidc);
    assert!(matches!(request, AuthProviderRequest::Oidc(_)));
}

#[test]
fn create_rejects_unknown_prefix_and_non_objects() {
    let err = build_create_request(&json!({"providerId": "google.com"})).unwrap_err();
    assert_eq!(err.code(), AuthErrorCode::InvalidProviderId);
    let err = build_create_request(&json!(null)).unwrap_err();
    assert_eq!(err.code(), AuthErrorCode::InvalidConfig);
}

#[test]
fn update_uses_patch_semantics() {
    let request = build_update_request("saml.provider", &json!({"displayName": "x"})).unwrap();
    assert_eq!(request.kind(), AuthProviderKind::Saml);
    assert_eq!(request.update_mask(), vec!["displayName".to_string()]);

    let err = build_update_request("facebook.com", &json!({})).unwrap_err();
    assert_eq!(err.code(), AuthErrorCode::InvalidProviderId);
    let err = build_update_request("saml.provider", &json!([])).unwrap_err();
    assert!(err.message().contains("UpdateAuthProviderRequest"));
    let err = build_update_request("saml.provider", &json!({"providerId": 42, "enabled": true}))
        .unwrap_err();
    assert_eq!(err.code(), AuthErrorCode::InvalidProviderId);
}

#[test]
fn update_mask_lists_nested_paths() {
    let request = build_update_request(
        "saml.provider",
        &json!({"idpEntityId": "IDP", "callbackURL": "https://example.com/cb"}),
    )
    .unwrap();
    assert_eq!(
        request.update_mask(),
        vec!["idpConfig.idpEntityId".to_string(), "spConfig.callbackUri".to_string()]
    );
}

#[test]
fn parse_dispatches_by_kind() {
    let config = parse_server_response(
        AuthProviderKind::Oidc,
        &json!({
            "name": "projects/p/oauthIdpConfigs/oidc.provider",
            "clientId": "CLIENT_ID",
            "issuer": "https://oidc.example.com",
            "enabled": true,
        }),
    )
    .unwrap();
    assert_eq!(config.provider_id(), "oidc.provider");
    assert_eq!(config.to_json()["enabled"], json!(true));
}

// ============================================================================
// SECTION: List Filters
// ============================================================================

#[test]
fn list_defaults_page_size() {
    let request = build_list_request(&json!({"type": "saml"})).unwrap();
    assert_eq!(request.kind, AuthProviderKind::Saml);
    assert_eq!(request.page_size, MAX_LIST_PROVIDER_CONFIGS_PAGE_SIZE);
    assert_eq!(serde_json::to_value(&request).unwrap(), json!({"pageSize": 100}));
}

#[test]
fn list_accepts_page_token() {
    let request =
        build_list_request(&json!({"type": "oidc", "maxResults": 10, "pageToken": "NEXT"})).unwrap();
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({"pageSize": 10, "pageToken": "NEXT"})
    );
}

#[test]
fn list_rejects_bad_filters() {
    let cases = [
        (json!({}), AuthErrorCode::InvalidArgument),
        (json!({"type": "ldap"}), AuthErrorCode::InvalidArgument),
        (json!({"type": "saml", "maxResults": 0}), AuthErrorCode::InvalidArgument),
        (json!({"type": "saml", "maxResults": 101}), AuthErrorCode::InvalidArgument),
        (json!({"type": "saml", "maxResults": 1.5}), AuthErrorCode::InvalidArgument),
        (json!({"type": "saml", "pageToken": ""}), AuthErrorCode::InvalidPageToken),
        (json!({"type": "saml", "pageToken": 3}), AuthErrorCode::InvalidPageToken),
        (json!({"type": "saml", "limit": 3}), AuthErrorCode::InvalidArgument),
    ];
    for (filter, code) in cases {
        assert_eq!(build_list_request(&filter).unwrap_err().code(), code);
    }
}

//! Error taxonomy tests for firebase-auth-config.
// crates/firebase-auth-config/tests/error_codes.rs
// =============================================================================
// Module: Error Code Tests
// Description: Stable labels and rendering for auth config errors.
// Purpose: Ensure callers can rely on machine-readable error codes.
// =============================================================================

use firebase_auth_config::AuthConfigError;
use firebase_auth_config::AuthErrorCode;
use firebase_auth_config::email_privacy;
use firebase_auth_config::mobile_links;

mod common;
use common::TestResult;
use common::assert_invalid;

#[test]
fn labels_are_stable() -> TestResult {
    let cases = [
        (AuthErrorCode::InvalidArgument, "auth/argument-error"),
        (AuthErrorCode::InvalidConfig, "auth/invalid-config"),
        (AuthErrorCode::InvalidProviderId, "auth/invalid-provider-id"),
        (AuthErrorCode::MaximumTestPhoneNumberExceeded, "auth/test-phone-number-limit-exceeded"),
        (AuthErrorCode::InvalidOauthResponseType, "auth/invalid-oauth-responsetype"),
        (AuthErrorCode::InternalError, "auth/internal-error"),
    ];
    for (code, label) in cases {
        if code.label() != label || code.to_string() != label {
            return Err(format!("code did not render as '{label}'"));
        }
    }
    Ok(())
}

#[test]
fn display_prefixes_message_with_label() -> TestResult {
    let error = AuthConfigError::invalid_config("\"x\" is not valid.");
    if error.to_string() != "auth/invalid-config: \"x\" is not valid." {
        return Err(format!("unexpected rendering '{error}'"));
    }
    let error = AuthConfigError::from_code(AuthErrorCode::InvalidPageToken);
    if error.message() != AuthErrorCode::InvalidPageToken.default_message() {
        return Err("from_code must use the default message".to_string());
    }
    Ok(())
}

#[test]
fn internal_errors_are_flagged() -> TestResult {
    let error = AuthConfigError::internal("tenant response");
    if !error.is_internal() || error.message() != "INTERNAL ASSERT FAILED: Invalid tenant response" {
        return Err(format!("unexpected internal error '{error}'"));
    }
    if AuthConfigError::invalid_argument("x").is_internal() {
        return Err("input faults must not be internal".to_string());
    }
    Ok(())
}

#[test]
fn flat_configs_use_argument_errors() -> TestResult {
    assert_invalid(
        email_privacy::validate(&serde_json::json!({"enableImprovedEmailPrivacy": "yes"})),
        AuthErrorCode::InvalidArgument,
        "enableImprovedEmailPrivacy",
    )?;
    assert_invalid(
        mobile_links::validate(&serde_json::json!({"domain": "CUSTOM_DOMAIN"})),
        AuthErrorCode::InvalidArgument,
        "HOSTING_DOMAIN",
    )?;
    assert_invalid(
        mobile_links::parse_server_response(&serde_json::json!("HOSTING_DOMAIN")),
        AuthErrorCode::InternalError,
        "mobile links",
    )
}

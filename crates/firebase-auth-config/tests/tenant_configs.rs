//! Tenant and project config integration tests for firebase-auth-config.
// crates/firebase-auth-config/tests/tenant_configs.rs
// =============================================================================
// Module: Tenant and Project Config Integration Tests
// Description: Composite request building across every policy domain.
// Purpose: Ensure nested configs validate and translate inside aggregates.
// =============================================================================

use firebase_auth_config::AuthErrorCode;
use firebase_auth_config::RequestMode;
use firebase_auth_config::email_sign_in;
use firebase_auth_config::phone;
use firebase_auth_config::project;
use firebase_auth_config::tenant;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;

mod common;
use common::TestResult;
use common::assert_invalid;
use common::wire;

/// Builds a test phone number map with `count` entries.
fn test_phone_numbers(count: usize) -> Value {
    let mut numbers = Map::new();
    for index in 0..count {
        numbers.insert(format!("+1650555{index:04}"), json!("123456"));
    }
    Value::Object(numbers)
}

// ============================================================================
// SECTION: Test Phone Numbers
// ============================================================================

#[test]
fn test_phone_numbers_at_limit_10() -> TestResult {
    let numbers = phone::validate_test_phone_numbers(&test_phone_numbers(
        phone::MAXIMUM_TEST_PHONE_NUMBERS,
    ))
    .map_err(|err| err.to_string())?;
    if numbers.len() != phone::MAXIMUM_TEST_PHONE_NUMBERS {
        return Err(format!("expected 10 numbers, got {}", numbers.len()));
    }
    Ok(())
}

#[test]
fn test_phone_numbers_over_limit_11() -> TestResult {
    assert_invalid(
        phone::validate_test_phone_numbers(&test_phone_numbers(11)),
        AuthErrorCode::MaximumTestPhoneNumberExceeded,
        "maximum allowed number",
    )
}

#[test]
fn test_phone_number_and_code_shapes() -> TestResult {
    assert_invalid(
        phone::validate_test_phone_numbers(&json!({"16505550101": "123456"})),
        AuthErrorCode::InvalidTestingPhoneNumber,
        "E.164",
    )?;
    assert_invalid(
        phone::validate_test_phone_numbers(&json!({"+16505550101": "12a456"})),
        AuthErrorCode::InvalidTestingPhoneNumber,
        "6 digit code",
    )?;
    assert_invalid(
        phone::validate_test_phone_numbers(&json!({"+16505550101": 123_456})),
        AuthErrorCode::InvalidTestingPhoneNumber,
        "\"123456\"",
    )?;
    assert_invalid(
        phone::validate_test_phone_numbers(&json!(["+16505550101"])),
        AuthErrorCode::InvalidArgument,
        "phone number / code pairs",
    )
}

// ============================================================================
// SECTION: Email Sign-In
// ============================================================================

#[test]
fn email_sign_in_inverts_password_required() -> TestResult {
    let request = email_sign_in::build_server_request(&json!({"passwordRequired": true}))
        .map_err(|err| err.to_string())?;
    if wire(&request)? != json!({"enableEmailLinkSignin": false}) {
        return Err("passwordRequired=true must send enableEmailLinkSignin=false".to_string());
    }
    let parsed = email_sign_in::parse_server_response(&json!({
        "allowPasswordSignup": false,
        "enableEmailLinkSignin": true,
    }))
    .map_err(|err| err.to_string())?;
    if parsed.to_json() != json!({"enabled": false, "passwordRequired": false}) {
        return Err(format!("unexpected email sign-in shape {}", parsed.to_json()));
    }
    Ok(())
}

#[test]
fn email_sign_in_response_requires_signup_flag() -> TestResult {
    assert_invalid(
        email_sign_in::parse_server_response(&json!({"enableEmailLinkSignin": true})),
        AuthErrorCode::InternalError,
        "INTERNAL ASSERT FAILED",
    )
}

// ============================================================================
// SECTION: Tenant Requests
// ============================================================================

#[test]
fn tenant_create_translates_every_domain() -> TestResult {
    let request = tenant::build_server_request(
        &json!({
            "displayName": "tenant",
            "emailSignInConfig": {"enabled": true},
            "multiFactorConfig": {"state": "ENABLED", "factorIds": ["phone"]},
            "testPhoneNumbers": {"+16505550101": "123456"},
            "smsRegionConfig": {"allowlistOnly": {"allowedRegions": ["US"]}},
            "recaptchaConfig": {"emailPasswordEnforcementState": "AUDIT"},
            "passwordPolicyConfig": {
                "enforcementState": "ENFORCE",
                "constraints": {"minLength": 8, "requireUppercase": true},
            },
            "emailPrivacyConfig": {"enableImprovedEmailPrivacy": true},
        }),
        RequestMode::Create,
    )
    .map_err(|err| err.to_string())?;
    let body = wire(&request)?;
    let expected = json!({
        "displayName": "tenant",
        "allowPasswordSignup": true,
        "mfaConfig": {"state": "ENABLED", "enabledProviders": ["PHONE_SMS"]},
        "testPhoneNumbers": {"+16505550101": "123456"},
        "smsRegionConfig": {"allowlistOnly": {"allowedRegions": ["US"]}},
        "recaptchaConfig": {"emailPasswordEnforcementState": "AUDIT"},
        "passwordPolicyConfig": {
            "passwordPolicyEnforcementState": "ENFORCE",
            "forceUpgradeOnSignin": false,
            "passwordPolicyVersions": [{
                "customStrengthOptions": {
                    "containsUppercaseCharacter": true,
                    "containsLowercaseCharacter": false,
                    "containsNonAlphanumericCharacter": false,
                    "containsNumericCharacter": false,
                    "minPasswordLength": 8,
                    "maxPasswordLength": 4096,
                },
            }],
        },
        "emailPrivacyConfig": {"enableImprovedEmailPrivacy": true},
    });
    if body != expected {
        return Err(format!("unexpected tenant body {body}"));
    }
    Ok(())
}

#[test]
fn tenant_rejects_both_sms_region_variants() -> TestResult {
    assert_invalid(
        tenant::validate(
            &json!({"smsRegionConfig": {
                "allowByDefault": {"disallowedRegions": ["AC"]},
                "allowlistOnly": {"allowedRegions": ["US"]},
            }}),
            RequestMode::Update,
        ),
        AuthErrorCode::InvalidConfig,
        "cannot have both",
    )
}

#[test]
fn tenant_password_policy_below_minimum_length() -> TestResult {
    assert_invalid(
        tenant::validate(
            &json!({"passwordPolicyConfig": {
                "enforcementState": "ENFORCE",
                "constraints": {"minLength": 5},
            }}),
            RequestMode::Create,
        ),
        AuthErrorCode::InvalidConfig,
        "between 6 and 30",
    )
}

#[test]
fn tenant_update_mask_stops_at_test_phone_numbers() -> TestResult {
    let request = tenant::build_server_request(
        &json!({
            "displayName": "renamed",
            "testPhoneNumbers": {"+16505550101": "123456", "+16505550102": "654321"},
        }),
        RequestMode::Update,
    )
    .map_err(|err| err.to_string())?;
    let mask = request.update_mask();
    if mask != vec!["displayName".to_string(), "testPhoneNumbers".to_string()] {
        return Err(format!("unexpected mask {}", mask.join(",")));
    }
    Ok(())
}

#[test]
fn tenant_response_round_trips_to_public_shape() -> TestResult {
    let tenant = tenant::parse_server_response(&json!({
        "name": "projects/project-id/tenants/TENANT-ID",
        "displayName": "TENANT-DISPLAY-NAME",
        "allowPasswordSignup": true,
        "enableEmailLinkSignin": false,
        "enableAnonymousUser": true,
        "smsRegionConfig": {"allowByDefault": {"disallowedRegions": ["AC"]}},
        "passwordPolicyConfig": {
            "passwordPolicyEnforcementState": "OFF",
            "forceUpgradeOnSignin": true,
        },
    }))
    .map_err(|err| err.to_string())?;
    let public = tenant.to_json();
    let expected = json!({
        "tenantId": "TENANT-ID",
        "displayName": "TENANT-DISPLAY-NAME",
        "emailSignInConfig": {"enabled": true, "passwordRequired": true},
        "anonymousSignInEnabled": true,
        "smsRegionConfig": {"allowByDefault": {"disallowedRegions": ["AC"]}},
        "passwordPolicyConfig": {
            "enforcementState": "OFF",
            "forceUpgradeOnSignin": true,
            "constraints": {},
        },
    });
    if public != expected {
        return Err(format!("unexpected tenant shape {public}"));
    }
    if tenant.to_json() != public {
        return Err("to_json must be stable".to_string());
    }
    Ok(())
}

#[test]
fn tenant_to_json_returns_independent_copies() -> TestResult {
    let tenant = tenant::parse_server_response(&json!({
        "name": "projects/project-id/tenants/TENANT-ID",
        "allowPasswordSignup": true,
        "testPhoneNumbers": {"+16505550101": "123456"},
        "mfaConfig": {"state": "ENABLED", "enabledProviders": ["PHONE_SMS"]},
    }))
    .map_err(|err| err.to_string())?;
    let mut first = tenant.to_json();
    let second = tenant.to_json();
    if first != second {
        return Err("repeated to_json calls must be equal".to_string());
    }
    first
        .get_mut("testPhoneNumbers")
        .and_then(Value::as_object_mut)
        .ok_or("testPhoneNumbers missing from tenant shape")?
        .insert("+16505550101".to_string(), json!("000000"));
    let third = tenant.to_json();
    for copy in [&second, &third] {
        if copy["testPhoneNumbers"]["+16505550101"] != json!("123456") {
            return Err(format!("mutation leaked into another copy {copy}"));
        }
    }
    if second != third {
        return Err("to_json must not observe caller mutations".to_string());
    }
    Ok(())
}

// ============================================================================
// SECTION: Project Requests
// ============================================================================

#[test]
fn project_update_uses_mfa_key_and_mask() -> TestResult {
    let request = project::build_server_request(&json!({
        "multiFactorConfig": {
            "providerConfigs": [{"state": "ENABLED", "totpProviderConfig": {"adjacentIntervals": 5}}],
        },
        "emailPrivacyConfig": {"enableImprovedEmailPrivacy": false},
    }))
    .map_err(|err| err.to_string())?;
    let body = wire(&request)?;
    let expected = json!({
        "mfa": {
            "providerConfigs": [{"state": "ENABLED", "totpProviderConfig": {"adjacentIntervals": 5}}],
        },
        "emailPrivacyConfig": {"enableImprovedEmailPrivacy": false},
    });
    if body != expected {
        return Err(format!("unexpected project body {body}"));
    }
    let mask = request.update_mask();
    if mask
        != vec![
            "emailPrivacyConfig.enableImprovedEmailPrivacy".to_string(),
            "mfa.providerConfigs".to_string(),
        ]
    {
        return Err(format!("unexpected mask {}", mask.join(",")));
    }
    Ok(())
}

#[test]
fn project_rejects_tenant_keys() -> TestResult {
    assert_invalid(
        project::validate(&json!({"anonymousSignInEnabled": true})),
        AuthErrorCode::InvalidArgument,
        "UpdateProjectConfigRequest",
    )
}

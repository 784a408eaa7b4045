// crates/firebase-auth-config/tests/common/mod.rs
// =============================================================================
// Module: Auth Config Test Helpers
// Description: Shared fixtures and assertions for integration tests.
// Purpose: Reduce duplication across firebase-auth-config test suites.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use firebase_auth_config::AuthConfigError;
use firebase_auth_config::AuthErrorCode;
use serde_json::Value;
use serde_json::json;

/// Result type used by integration tests.
pub type TestResult = Result<(), String>;

/// Asserts that `result` failed with `code` and a message containing `needle`.
pub fn assert_invalid<T>(
    result: Result<T, AuthConfigError>,
    code: AuthErrorCode,
    needle: &str,
) -> TestResult {
    match result {
        Err(error) => {
            if error.code() != code {
                return Err(format!("error '{error}' did not carry code '{}'", code.label()));
            }
            if error.message().contains(needle) {
                Ok(())
            } else {
                Err(format!("error '{error}' did not contain '{needle}'"))
            }
        }
        Ok(_) => Err("expected invalid config".to_string()),
    }
}

/// Serializes a wire request for comparison.
pub fn wire<T: serde::Serialize>(request: &T) -> Result<Value, String> {
    serde_json::to_value(request).map_err(|err| err.to_string())
}

/// Returns a fully populated public SAML config.
pub fn saml_options() -> Value {
    json!({
        "providerId": "saml.provider",
        "displayName": "SAML_DISPLAY_NAME",
        "enabled": true,
        "idpEntityId": "IDP_ENTITY_ID",
        "ssoURL": "https://example.com/login",
        "x509Certificates": ["CERT1", "CERT2"],
        "rpEntityId": "RP_ENTITY_ID",
        "callbackURL": "https://projectId.firebaseapp.com/__/auth/handler",
        "enableRequestSigning": true,
    })
}

/// Returns the server response matching [`saml_options`].
pub fn saml_response() -> Value {
    json!({
        "name": "projects/project_id/inboundSamlConfigs/saml.provider",
        "idpConfig": {
            "idpEntityId": "IDP_ENTITY_ID",
            "ssoUrl": "https://example.com/login",
            "signRequest": true,
            "idpCertificates": [{"x509Certificate": "CERT1"}, {"x509Certificate": "CERT2"}],
        },
        "spConfig": {
            "spEntityId": "RP_ENTITY_ID",
            "callbackUri": "https://projectId.firebaseapp.com/__/auth/handler",
        },
        "displayName": "SAML_DISPLAY_NAME",
        "enabled": true,
    })
}

/// Returns a fully populated public OIDC config.
pub fn oidc_options() -> Value {
    json!({
        "providerId": "oidc.provider",
        "displayName": "OIDC_DISPLAY_NAME",
        "enabled": true,
        "clientId": "CLIENT_ID",
        "issuer": "https://oidc.com/issuer",
        "clientSecret": "CLIENT_SECRET",
        "responseType": {"code": true},
    })
}

/// Returns the server response matching [`oidc_options`].
pub fn oidc_response() -> Value {
    json!({
        "name": "projects/project_id/oauthIdpConfigs/oidc.provider",
        "displayName": "OIDC_DISPLAY_NAME",
        "enabled": true,
        "clientId": "CLIENT_ID",
        "issuer": "https://oidc.com/issuer",
        "clientSecret": "CLIENT_SECRET",
        "responseType": {"code": true},
    })
}

// crates/firebase-auth-config/src/email_privacy.rs
// ============================================================================
// Module: Email Privacy Config
// Description: Email enumeration protection setting.
// Dependencies: serde, serde_json, tracing
// ============================================================================

//! ## Overview
//! A single flag; the wire shape matches the public shape.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::AuthConfigError;
use crate::object::ConfigObject;
use crate::translate::decode_response;
use crate::translate::to_json_value;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Accepted keys.
const EMAIL_PRIVACY_KEYS: &[&str] = &["enableImprovedEmailPrivacy"];
/// Label used in response contract errors.
const RESPONSE_LABEL: &str = "email privacy configuration response";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Email privacy settings; public, wire, and parsed shapes coincide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailPrivacyConfig {
    /// Whether improved email privacy (enumeration protection) is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_improved_email_privacy: Option<bool>,
}

impl EmailPrivacyConfig {
    /// Returns the public JSON representation.
    #[must_use]
    pub fn to_json(&self) -> Value {
        to_json_value(self)
    }
}

// ============================================================================
// SECTION: Operations
// ============================================================================

/// Validates public email privacy settings.
///
/// # Errors
///
/// Returns an `InvalidArgument` [`AuthConfigError`] for a non-object input,
/// unknown keys, or a non-boolean flag.
pub fn validate(options: &Value) -> Result<EmailPrivacyConfig, AuthConfigError> {
    let object = ConfigObject::parse(options, || {
        AuthConfigError::invalid_argument("\"EmailPrivacyConfig\" must be a valid non-null object.")
    })?;
    object.reject_unknown_keys(EMAIL_PRIVACY_KEYS, |key| {
        AuthConfigError::invalid_argument(format!(
            "\"{key}\" is not a valid \"EmailPrivacyConfig\" parameter."
        ))
    })?;
    let enable_improved_email_privacy = object.optional_bool("enableImprovedEmailPrivacy", || {
        AuthConfigError::invalid_argument(
            "\"EmailPrivacyConfig.enableImprovedEmailPrivacy\" must be a valid boolean value.",
        )
    })?;
    Ok(EmailPrivacyConfig {
        enable_improved_email_privacy,
    })
}

/// Validates `options` and builds the wire request.
///
/// # Errors
///
/// Returns [`AuthConfigError`] when validation fails.
pub fn build_server_request(options: &Value) -> Result<EmailPrivacyConfig, AuthConfigError> {
    let request = validate(options)?;
    debug!(config = "email_privacy", "built email privacy request");
    Ok(request)
}

/// Parses email privacy settings from a server response.
///
/// # Errors
///
/// Returns an internal [`AuthConfigError`] when the response is not an object
/// or the flag is not a boolean.
pub fn parse_server_response(response: &Value) -> Result<EmailPrivacyConfig, AuthConfigError> {
    decode_response(response, RESPONSE_LABEL)
}

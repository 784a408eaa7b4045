// crates/firebase-auth-config/src/email_sign_in.rs
// ============================================================================
// Module: Email Sign-In Config
// Description: Email/password provider settings and wire translation.
// Purpose: Map `enabled`/`passwordRequired` onto the backend's inverted flags.
// Dependencies: serde, serde_json, tracing
// ============================================================================

//! ## Overview
//! `enabled` maps to `allowPasswordSignup`. `passwordRequired` maps to
//! `enableEmailLinkSignin` with the value negated: requiring a password means
//! email-link sign-in is off.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::AuthConfigError;
use crate::object::ConfigObject;
use crate::translate::contract_violation;
use crate::translate::decode_response;
use crate::translate::to_json_value;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Accepted top-level keys.
const EMAIL_SIGN_IN_KEYS: &[&str] = &["enabled", "passwordRequired"];
/// Label used in response contract errors.
const RESPONSE_LABEL: &str = "email sign-in configuration response";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Validated public email sign-in settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailSignInProviderConfig {
    /// Whether email/password sign-in is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Whether a password is required (false allows email-link sign-in).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_required: Option<bool>,
}

/// Email sign-in fields as exchanged with the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailSignInServerConfig {
    /// Backend flag for email/password sign-up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_password_signup: Option<bool>,
    /// Backend flag for email-link sign-in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_email_link_signin: Option<bool>,
}

impl From<&EmailSignInProviderConfig> for EmailSignInServerConfig {
    fn from(config: &EmailSignInProviderConfig) -> Self {
        Self {
            allow_password_signup: config.enabled,
            enable_email_link_signin: config.password_required.map(|required| !required),
        }
    }
}

/// Email sign-in settings parsed from a server response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailSignInConfig {
    /// Whether email/password sign-in is enabled.
    pub enabled: bool,
    /// Whether a password is required.
    pub password_required: bool,
}

impl EmailSignInConfig {
    /// Settings used when the backend omits email sign-in entirely.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            password_required: true,
        }
    }

    /// Returns the public JSON representation.
    #[must_use]
    pub fn to_json(&self) -> Value {
        to_json_value(self)
    }
}

impl TryFrom<EmailSignInServerConfig> for EmailSignInConfig {
    type Error = AuthConfigError;

    fn try_from(server: EmailSignInServerConfig) -> Result<Self, Self::Error> {
        let Some(enabled) = server.allow_password_signup else {
            return Err(contract_violation(RESPONSE_LABEL, "missing allowPasswordSignup"));
        };
        Ok(Self {
            enabled,
            password_required: !server.enable_email_link_signin.unwrap_or(false),
        })
    }
}

// ============================================================================
// SECTION: Operations
// ============================================================================

/// Validates public email sign-in settings.
///
/// # Errors
///
/// Returns an `InvalidArgument` [`AuthConfigError`] for a non-object input,
/// unknown keys, or non-boolean flags.
pub fn validate(options: &Value) -> Result<EmailSignInProviderConfig, AuthConfigError> {
    let object = ConfigObject::parse(options, || {
        AuthConfigError::invalid_argument("\"EmailSignInConfig\" must be a non-null object.")
    })?;
    object.reject_unknown_keys(EMAIL_SIGN_IN_KEYS, |key| {
        AuthConfigError::invalid_argument(format!(
            "\"{key}\" is not a valid EmailSignInConfig parameter."
        ))
    })?;
    let enabled = object.optional_bool("enabled", || {
        AuthConfigError::invalid_argument("\"EmailSignInConfig.enabled\" must be a boolean.")
    })?;
    let password_required = object.optional_bool("passwordRequired", || {
        AuthConfigError::invalid_argument(
            "\"EmailSignInConfig.passwordRequired\" must be a boolean.",
        )
    })?;
    Ok(EmailSignInProviderConfig {
        enabled,
        password_required,
    })
}

/// Validates `options` and builds the wire fields.
///
/// # Errors
///
/// Returns [`AuthConfigError`] when validation fails.
pub fn build_server_request(options: &Value) -> Result<EmailSignInServerConfig, AuthConfigError> {
    let request = EmailSignInServerConfig::from(&validate(options)?);
    debug!(config = "email_sign_in", "built email sign-in request");
    Ok(request)
}

/// Parses email sign-in settings from a server response.
///
/// # Errors
///
/// Returns an internal [`AuthConfigError`] when `allowPasswordSignup` is
/// missing.
pub fn parse_server_response(response: &Value) -> Result<EmailSignInConfig, AuthConfigError> {
    let decoded: EmailSignInServerConfig = decode_response(response, RESPONSE_LABEL)?;
    EmailSignInConfig::try_from(decoded)
}

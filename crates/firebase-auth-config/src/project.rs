// crates/firebase-auth-config/src/project.rs
// ============================================================================
// Module: Project Config
// Description: Project-level auth config update validation and parsing.
// Purpose: Compose the per-domain translators into one project update.
// Dependencies: serde, serde_json, tracing
// ============================================================================

//! ## Overview
//! Project config is only ever updated, never created. Multi-factor settings
//! travel under the wire key `mfa` rather than `mfaConfig`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::email_privacy;
use crate::email_privacy::EmailPrivacyConfig;
use crate::error::AuthConfigError;
use crate::mobile_links;
use crate::mobile_links::MobileLinksConfig;
use crate::multi_factor;
use crate::multi_factor::MultiFactorAuthConfig;
use crate::multi_factor::MultiFactorConfig;
use crate::multi_factor::MultiFactorServerConfig;
use crate::object::ConfigObject;
use crate::password_policy;
use crate::password_policy::PasswordPolicyAuthConfig;
use crate::password_policy::PasswordPolicyConfig;
use crate::password_policy::PasswordPolicyServerConfig;
use crate::recaptcha;
use crate::recaptcha::RecaptchaConfig;
use crate::recaptcha::RecaptchaServerConfig;
use crate::sms_region;
use crate::sms_region::SmsRegionConfig;
use crate::translate::decode_response;
use crate::translate::to_json_value;
use crate::update_mask::update_mask_for;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Accepted top-level keys.
const PROJECT_CONFIG_KEYS: &[&str] = &[
    "smsRegionConfig",
    "multiFactorConfig",
    "recaptchaConfig",
    "passwordPolicyConfig",
    "emailPrivacyConfig",
    "mobileLinksConfig",
];
/// Label used for top-level input faults.
const REQUEST_LABEL: &str = "UpdateProjectConfigRequest";
/// Label used in response contract errors.
const RESPONSE_LABEL: &str = "project configuration response";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Validated public project config update.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateProjectConfigOptions {
    /// SMS region policy.
    pub sms_region_config: Option<SmsRegionConfig>,
    /// Multi-factor settings.
    pub multi_factor_config: Option<MultiFactorConfig>,
    /// reCAPTCHA settings.
    pub recaptcha_config: Option<RecaptchaConfig>,
    /// Password policy.
    pub password_policy_config: Option<PasswordPolicyConfig>,
    /// Email privacy settings.
    pub email_privacy_config: Option<EmailPrivacyConfig>,
    /// Mobile links settings.
    pub mobile_links_config: Option<MobileLinksConfig>,
}

/// Project config update request body.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfigServerRequest {
    /// SMS region policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms_region_config: Option<SmsRegionConfig>,
    /// Multi-factor settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mfa: Option<MultiFactorServerConfig>,
    /// reCAPTCHA settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recaptcha_config: Option<RecaptchaServerConfig>,
    /// Password policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_policy_config: Option<PasswordPolicyServerConfig>,
    /// Email privacy settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_privacy_config: Option<EmailPrivacyConfig>,
    /// Mobile links settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_links_config: Option<MobileLinksConfig>,
}

impl ProjectConfigServerRequest {
    /// Returns the update mask for sending this body as a PATCH.
    #[must_use]
    pub fn update_mask(&self) -> Vec<String> {
        update_mask_for(self, &[])
    }
}

impl From<&UpdateProjectConfigOptions> for ProjectConfigServerRequest {
    fn from(options: &UpdateProjectConfigOptions) -> Self {
        Self {
            sms_region_config: options.sms_region_config.clone(),
            mfa: options.multi_factor_config.as_ref().map(MultiFactorServerConfig::from),
            recaptcha_config: options.recaptcha_config.as_ref().map(RecaptchaServerConfig::from),
            password_policy_config: options
                .password_policy_config
                .as_ref()
                .map(PasswordPolicyServerConfig::from),
            email_privacy_config: options.email_privacy_config,
            mobile_links_config: options.mobile_links_config,
        }
    }
}

/// Project config response body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectConfigResponse {
    /// SMS region policy.
    #[serde(default)]
    sms_region_config: Option<Value>,
    /// Multi-factor settings.
    #[serde(default)]
    mfa: Option<Value>,
    /// reCAPTCHA settings.
    #[serde(default)]
    recaptcha_config: Option<Value>,
    /// Password policy.
    #[serde(default)]
    password_policy_config: Option<Value>,
    /// Email privacy settings.
    #[serde(default)]
    email_privacy_config: Option<Value>,
    /// Mobile links settings.
    #[serde(default)]
    mobile_links_config: Option<Value>,
}

/// Project config parsed from a server response.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    /// SMS region policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms_region_config: Option<SmsRegionConfig>,
    /// Multi-factor settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi_factor_config: Option<MultiFactorAuthConfig>,
    /// reCAPTCHA settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recaptcha_config: Option<RecaptchaConfig>,
    /// Password policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_policy_config: Option<PasswordPolicyAuthConfig>,
    /// Email privacy settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_privacy_config: Option<EmailPrivacyConfig>,
    /// Mobile links settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_links_config: Option<MobileLinksConfig>,
}

impl ProjectConfig {
    /// Returns the public JSON representation.
    #[must_use]
    pub fn to_json(&self) -> Value {
        to_json_value(self)
    }
}

// ============================================================================
// SECTION: Operations
// ============================================================================

/// Validates a public project config update.
///
/// # Errors
///
/// Returns an `InvalidArgument` [`AuthConfigError`] for top-level faults, or
/// the owning translator's error for a nested config.
pub fn validate(options: &Value) -> Result<UpdateProjectConfigOptions, AuthConfigError> {
    let object = ConfigObject::parse(options, || {
        AuthConfigError::invalid_argument(format!(
            "\"{REQUEST_LABEL}\" must be a valid non-null object."
        ))
    })?;
    object.reject_unknown_keys(PROJECT_CONFIG_KEYS, |key| {
        AuthConfigError::invalid_argument(format!(
            "\"{key}\" is not a valid {REQUEST_LABEL} parameter."
        ))
    })?;
    let sms_region_config = match object.get("smsRegionConfig") {
        None => None,
        Some(value) => sms_region::validate(value)?,
    };
    Ok(UpdateProjectConfigOptions {
        sms_region_config,
        multi_factor_config: object
            .get("multiFactorConfig")
            .map(multi_factor::validate)
            .transpose()?,
        recaptcha_config: object.get("recaptchaConfig").map(recaptcha::validate).transpose()?,
        password_policy_config: object
            .get("passwordPolicyConfig")
            .map(password_policy::validate)
            .transpose()?,
        email_privacy_config: object
            .get("emailPrivacyConfig")
            .map(email_privacy::validate)
            .transpose()?,
        mobile_links_config: object
            .get("mobileLinksConfig")
            .map(mobile_links::validate)
            .transpose()?,
    })
}

/// Validates `options` and builds the wire request.
///
/// # Errors
///
/// Returns [`AuthConfigError`] when validation fails.
pub fn build_server_request(
    options: &Value,
) -> Result<ProjectConfigServerRequest, AuthConfigError> {
    let request = ProjectConfigServerRequest::from(&validate(options)?);
    debug!(config = "project", fields = request.update_mask().len(), "built project config request");
    Ok(request)
}

/// Parses a project config from a server response.
///
/// # Errors
///
/// Returns an internal [`AuthConfigError`] when the response is not an object
/// or a nested config violates its own response contract.
pub fn parse_server_response(response: &Value) -> Result<ProjectConfig, AuthConfigError> {
    let decoded: ProjectConfigResponse = decode_response(response, RESPONSE_LABEL)?;
    Ok(ProjectConfig {
        sms_region_config: decoded
            .sms_region_config
            .as_ref()
            .map(sms_region::parse_server_response)
            .transpose()?
            .flatten(),
        multi_factor_config: decoded
            .mfa
            .as_ref()
            .map(multi_factor::parse_server_response)
            .transpose()?,
        recaptcha_config: decoded
            .recaptcha_config
            .as_ref()
            .map(recaptcha::parse_server_response)
            .transpose()?,
        password_policy_config: decoded
            .password_policy_config
            .as_ref()
            .map(password_policy::parse_server_response)
            .transpose()?,
        email_privacy_config: decoded
            .email_privacy_config
            .as_ref()
            .map(email_privacy::parse_server_response)
            .transpose()?,
        mobile_links_config: decoded
            .mobile_links_config
            .as_ref()
            .map(mobile_links::parse_server_response)
            .transpose()?,
    })
}

// crates/firebase-auth-config/src/tenant.rs
// ============================================================================
// Module: Tenant Config
// Description: Tenant create/update validation and response parsing.
// Purpose: Compose the per-domain translators into one tenant request.
// Dependencies: regex, serde, serde_json, tracing
// ============================================================================

//! ## Overview
//! A tenant request bundles the per-domain configs under tenant-level keys.
//! Top-level faults are reported against `CreateTenantRequest` or
//! `UpdateTenantRequest`; nested faults come from the domain translator that
//! owns the field.
//!
//! On update, `testPhoneNumbers: null` clears every test number and is sent
//! as an empty map. Email sign-in fields are flattened into the tenant body.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::email_privacy;
use crate::email_privacy::EmailPrivacyConfig;
use crate::email_sign_in;
use crate::email_sign_in::EmailSignInConfig;
use crate::email_sign_in::EmailSignInProviderConfig;
use crate::email_sign_in::EmailSignInServerConfig;
use crate::error::AuthConfigError;
use crate::error::AuthErrorCode;
use crate::multi_factor;
use crate::multi_factor::MultiFactorAuthConfig;
use crate::multi_factor::MultiFactorConfig;
use crate::multi_factor::MultiFactorServerConfig;
use crate::object::ConfigObject;
use crate::password_policy;
use crate::password_policy::PasswordPolicyAuthConfig;
use crate::password_policy::PasswordPolicyConfig;
use crate::password_policy::PasswordPolicyServerConfig;
use crate::phone::validate_test_phone_numbers;
use crate::recaptcha;
use crate::recaptcha::RecaptchaConfig;
use crate::recaptcha::RecaptchaServerConfig;
use crate::sms_region;
use crate::sms_region::SmsRegionConfig;
use crate::translate::RequestMode;
use crate::translate::contract_violation;
use crate::translate::decode_response;
use crate::translate::to_json_value;
use crate::update_mask::update_mask_for;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Accepted top-level keys.
const TENANT_KEYS: &[&str] = &[
    "displayName",
    "emailSignInConfig",
    "anonymousSignInEnabled",
    "multiFactorConfig",
    "testPhoneNumbers",
    "smsRegionConfig",
    "recaptchaConfig",
    "passwordPolicyConfig",
    "emailPrivacyConfig",
];
/// Map-valued paths replaced wholesale by an update.
const TENANT_TERMINAL_PATHS: &[&str] = &["testPhoneNumbers"];
/// Label used in response contract errors.
const RESPONSE_LABEL: &str = "tenant response";

/// Trailing `tenants/<id>` segment of a resource name.
static RESOURCE_NAME_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"/tenants/(.*)$").ok());

// ============================================================================
// SECTION: Types
// ============================================================================

/// Validated public tenant options.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TenantOptions {
    /// Display name.
    pub display_name: Option<String>,
    /// Email sign-in settings.
    pub email_sign_in_config: Option<EmailSignInProviderConfig>,
    /// Whether anonymous sign-in is enabled.
    pub anonymous_sign_in_enabled: Option<bool>,
    /// Multi-factor settings.
    pub multi_factor_config: Option<MultiFactorConfig>,
    /// Test phone numbers; an empty map clears them.
    pub test_phone_numbers: Option<BTreeMap<String, String>>,
    /// SMS region policy.
    pub sms_region_config: Option<SmsRegionConfig>,
    /// reCAPTCHA settings.
    pub recaptcha_config: Option<RecaptchaConfig>,
    /// Password policy.
    pub password_policy_config: Option<PasswordPolicyConfig>,
    /// Email privacy settings.
    pub email_privacy_config: Option<EmailPrivacyConfig>,
}

/// Tenant create/update request body.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantServerRequest {
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Email sign-in flags, flattened into the tenant body.
    #[serde(flatten)]
    pub email_sign_in: Option<EmailSignInServerConfig>,
    /// Whether anonymous sign-in is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_anonymous_user: Option<bool>,
    /// Multi-factor settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mfa_config: Option<MultiFactorServerConfig>,
    /// Test phone numbers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_phone_numbers: Option<BTreeMap<String, String>>,
    /// SMS region policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms_region_config: Option<SmsRegionConfig>,
    /// reCAPTCHA settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recaptcha_config: Option<RecaptchaServerConfig>,
    /// Password policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_policy_config: Option<PasswordPolicyServerConfig>,
    /// Email privacy settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_privacy_config: Option<EmailPrivacyConfig>,
}

impl TenantServerRequest {
    /// Returns the update mask for sending this body as a PATCH.
    #[must_use]
    pub fn update_mask(&self) -> Vec<String> {
        update_mask_for(self, TENANT_TERMINAL_PATHS)
    }
}

impl From<&TenantOptions> for TenantServerRequest {
    fn from(options: &TenantOptions) -> Self {
        Self {
            display_name: options.display_name.clone(),
            email_sign_in: options.email_sign_in_config.as_ref().map(EmailSignInServerConfig::from),
            enable_anonymous_user: options.anonymous_sign_in_enabled,
            mfa_config: options.multi_factor_config.as_ref().map(MultiFactorServerConfig::from),
            test_phone_numbers: options.test_phone_numbers.clone(),
            sms_region_config: options.sms_region_config.clone(),
            recaptcha_config: options.recaptcha_config.as_ref().map(RecaptchaServerConfig::from),
            password_policy_config: options
                .password_policy_config
                .as_ref()
                .map(PasswordPolicyServerConfig::from),
            email_privacy_config: options.email_privacy_config,
        }
    }
}

/// Tenant response body; nested configs are handed to their translators.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TenantResponse {
    /// Resource name.
    #[serde(default)]
    name: Option<String>,
    /// Display name.
    #[serde(default)]
    display_name: Option<String>,
    /// Email sign-in flags.
    #[serde(flatten)]
    email_sign_in: EmailSignInServerConfig,
    /// Whether anonymous sign-in is enabled.
    #[serde(default)]
    enable_anonymous_user: Option<bool>,
    /// Multi-factor settings.
    #[serde(default)]
    mfa_config: Option<Value>,
    /// SMS region policy.
    #[serde(default)]
    sms_region_config: Option<Value>,
    /// reCAPTCHA settings.
    #[serde(default)]
    recaptcha_config: Option<Value>,
    /// Password policy.
    #[serde(default)]
    password_policy_config: Option<Value>,
    /// Email privacy settings.
    #[serde(default)]
    email_privacy_config: Option<Value>,
}

/// Tenant parsed from a server response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    /// Tenant ID.
    pub tenant_id: String,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Email sign-in settings; disabled when the backend omits them.
    pub email_sign_in_config: EmailSignInConfig,
    /// Multi-factor settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi_factor_config: Option<MultiFactorAuthConfig>,
    /// Whether anonymous sign-in is enabled.
    pub anonymous_sign_in_enabled: bool,
    /// Test phone numbers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_phone_numbers: Option<BTreeMap<String, String>>,
    /// SMS region policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms_region_config: Option<SmsRegionConfig>,
    /// reCAPTCHA settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recaptcha_config: Option<RecaptchaConfig>,
    /// Password policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_policy_config: Option<PasswordPolicyAuthConfig>,
    /// Email privacy settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_privacy_config: Option<EmailPrivacyConfig>,
}

impl Tenant {
    /// Returns the public JSON representation.
    #[must_use]
    pub fn to_json(&self) -> Value {
        to_json_value(self)
    }
}

// ============================================================================
// SECTION: Identity Helpers
// ============================================================================

/// Extracts the tenant ID from a resource name of the form
/// `projects/<project>/tenants/<tenantId>`.
#[must_use]
pub fn tenant_id_from_resource_name(resource_name: &str) -> Option<String> {
    RESOURCE_NAME_PATTERN
        .as_ref()?
        .captures(resource_name)?
        .get(1)
        .map(|id| id.as_str().to_string())
        .filter(|id| !id.is_empty())
}

/// Validates a tenant ID supplied by a caller.
///
/// # Errors
///
/// Returns an `InvalidTenantId` [`AuthConfigError`] unless `tenant_id` is a
/// non-empty string.
pub fn validate_tenant_id(tenant_id: &Value) -> Result<String, AuthConfigError> {
    tenant_id
        .as_str()
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AuthConfigError::from_code(AuthErrorCode::InvalidTenantId))
}

// ============================================================================
// SECTION: Operations
// ============================================================================

/// Validates public tenant options.
///
/// # Errors
///
/// Returns an `InvalidArgument` [`AuthConfigError`] for top-level faults, or
/// the owning translator's error for a nested config.
pub fn validate(options: &Value, mode: RequestMode) -> Result<TenantOptions, AuthConfigError> {
    let label = if mode.is_update() { "UpdateTenantRequest" } else { "CreateTenantRequest" };
    let object = ConfigObject::parse(options, || {
        AuthConfigError::invalid_argument(format!("\"{label}\" must be a valid non-null object."))
    })?;
    object.reject_unknown_keys(TENANT_KEYS, |key| {
        AuthConfigError::invalid_argument(format!("\"{key}\" is not a valid {label} parameter."))
    })?;
    let display_name = object.optional_non_empty_string("displayName", || {
        AuthConfigError::invalid_argument(format!(
            "\"{label}.displayName\" must be a valid non-empty string."
        ))
    })?;
    let email_sign_in_config =
        object.get("emailSignInConfig").map(email_sign_in::validate).transpose()?;
    let anonymous_sign_in_enabled = object.optional_bool("anonymousSignInEnabled", || {
        AuthConfigError::invalid_argument(format!(
            "\"{label}.anonymousSignInEnabled\" must be a valid boolean."
        ))
    })?;
    let test_phone_numbers = match object.get("testPhoneNumbers") {
        None => None,
        Some(Value::Null) if mode.is_update() => Some(BTreeMap::new()),
        Some(Value::Null) => {
            return Err(AuthConfigError::invalid_argument(format!(
                "\"{label}.testPhoneNumbers\" must be a non-null object."
            )));
        }
        Some(value) => Some(validate_test_phone_numbers(value)?),
    };
    let multi_factor_config =
        object.get("multiFactorConfig").map(multi_factor::validate).transpose()?;
    let sms_region_config = match object.get("smsRegionConfig") {
        None => None,
        Some(value) => sms_region::validate(value)?,
    };
    let recaptcha_config = object.get("recaptchaConfig").map(recaptcha::validate).transpose()?;
    let password_policy_config =
        object.get("passwordPolicyConfig").map(password_policy::validate).transpose()?;
    let email_privacy_config =
        object.get("emailPrivacyConfig").map(email_privacy::validate).transpose()?;

    Ok(TenantOptions {
        display_name,
        email_sign_in_config,
        anonymous_sign_in_enabled,
        multi_factor_config,
        test_phone_numbers,
        sms_region_config,
        recaptcha_config,
        password_policy_config,
        email_privacy_config,
    })
}

/// Validates `options` and builds the wire request.
///
/// # Errors
///
/// Returns [`AuthConfigError`] when validation fails.
pub fn build_server_request(
    options: &Value,
    mode: RequestMode,
) -> Result<TenantServerRequest, AuthConfigError> {
    let request = TenantServerRequest::from(&validate(options, mode)?);
    debug!(
        config = "tenant",
        mode = mode.as_str(),
        test_phone_numbers = request.test_phone_numbers.as_ref().map_or(0, BTreeMap::len),
        "built tenant request"
    );
    Ok(request)
}

/// Parses a tenant from a server response.
///
/// # Errors
///
/// Returns an internal [`AuthConfigError`] when the resource name is missing
/// or a nested config violates its own response contract.
pub fn parse_server_response(response: &Value) -> Result<Tenant, AuthConfigError> {
    let decoded: TenantResponse = decode_response(response, RESPONSE_LABEL)?;
    let tenant_id = decoded
        .name
        .as_deref()
        .and_then(tenant_id_from_resource_name)
        .ok_or_else(|| contract_violation(RESPONSE_LABEL, "missing or malformed name"))?;
    let email_sign_in_config = if decoded.email_sign_in.allow_password_signup.is_some() {
        EmailSignInConfig::try_from(decoded.email_sign_in)?
    } else {
        EmailSignInConfig::disabled()
    };
    Ok(Tenant {
        tenant_id,
        display_name: decoded.display_name,
        email_sign_in_config,
        multi_factor_config: decoded
            .mfa_config
            .as_ref()
            .map(multi_factor::parse_server_response)
            .transpose()?,
        anonymous_sign_in_enabled: decoded.enable_anonymous_user.unwrap_or(false),
        test_phone_numbers: parse_test_phone_numbers(response.get("testPhoneNumbers"))?,
        sms_region_config: decoded
            .sms_region_config
            .as_ref()
            .map(sms_region::parse_server_response)
            .transpose()?
            .flatten(),
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
    })
}

/// Decodes reported test phone numbers; `null` means an empty map.
fn parse_test_phone_numbers(
    value: Option<&Value>,
) -> Result<Option<BTreeMap<String, String>>, AuthConfigError> {
    match value {
        None => Ok(None),
        Some(Value::Null) => Ok(Some(BTreeMap::new())),
        Some(value) => BTreeMap::deserialize(value).map(Some).map_err(|err| {
            contract_violation(RESPONSE_LABEL, &format!("malformed testPhoneNumbers: {err}"))
        }),
    }
}

#[cfg(test)]
mod tests;

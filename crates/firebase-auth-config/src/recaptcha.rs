// crates/firebase-auth-config/src/recaptcha.rs
// ============================================================================
// Module: reCAPTCHA Config
// Description: reCAPTCHA enforcement policy validation and wire translation.
// Purpose: Validate enforcement states and managed rules; rename toll-fraud rules.
// Dependencies: serde, serde_json, tracing
// ============================================================================

//! ## Overview
//! Email/password and phone sign-in carry separate enforcement states.
//! Managed rules map a score threshold to an action, and `BLOCK` is the
//! only action defined today.
//!
//! The public `smsTollFraudManagedRules` field is `tollFraudManagedRules` on
//! the wire, in both directions. `recaptchaKeys` is populated by the backend
//! and never sent. Fields the backend omits stay absent in the public JSON.

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
use crate::translate::lenient_label;
use crate::translate::parse_label;
use crate::translate::to_json_value;
use crate::validator;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Accepted top-level keys.
const RECAPTCHA_KEYS: &[&str] = &[
    "emailPasswordEnforcementState",
    "phoneEnforcementState",
    "managedRules",
    "recaptchaKeys",
    "useAccountDefender",
    "useSmsBotScore",
    "useSmsTollFraudProtection",
    "smsTollFraudManagedRules",
];
/// Accepted reCAPTCHA key entry keys.
const RECAPTCHA_KEY_KEYS: &[&str] = &["type", "key"];
/// Label used in response contract errors.
const RESPONSE_LABEL: &str = "reCAPTCHA configuration response";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Enforcement state for a sign-in provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecaptchaProviderEnforcementState {
    /// Not evaluated.
    Off,
    /// Evaluated and logged only.
    Audit,
    /// Evaluated and enforced.
    Enforce,
}

/// Action taken when a managed rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecaptchaAction {
    /// Block the request.
    Block,
}

/// Platform of a reCAPTCHA site key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecaptchaKeyClientType {
    /// Web key.
    Web,
    /// iOS key.
    Ios,
    /// Android key.
    Android,
}

/// Score-threshold rule for sign-in risk.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecaptchaManagedRule {
    /// Upper score bound the action applies to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_score: Option<f64>,
    /// Action to take.
    #[serde(
        default,
        deserialize_with = "lenient_label",
        skip_serializing_if = "Option::is_none"
    )]
    pub action: Option<RecaptchaAction>,
}

/// Score-threshold rule for SMS toll fraud.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecaptchaTollFraudManagedRule {
    /// Lower score bound the action applies to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_score: Option<f64>,
    /// Action to take.
    #[serde(
        default,
        deserialize_with = "lenient_label",
        skip_serializing_if = "Option::is_none"
    )]
    pub action: Option<RecaptchaAction>,
}

/// reCAPTCHA site key populated by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecaptchaKey {
    /// Key platform.
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient_label",
        skip_serializing_if = "Option::is_none"
    )]
    pub key_type: Option<RecaptchaKeyClientType>,
    /// Site key.
    #[serde(default)]
    pub key: String,
}

/// Public reCAPTCHA config; both the validated input and the parsed value.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecaptchaConfig {
    /// Enforcement state for email/password sign-in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_password_enforcement_state: Option<RecaptchaProviderEnforcementState>,
    /// Enforcement state for phone sign-in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_enforcement_state: Option<RecaptchaProviderEnforcementState>,
    /// Sign-in risk rules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub managed_rules: Option<Vec<RecaptchaManagedRule>>,
    /// Backend-populated site keys.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recaptcha_keys: Option<Vec<RecaptchaKey>>,
    /// Whether account defender assessment is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_account_defender: Option<bool>,
    /// Whether SMS bot scoring is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_sms_bot_score: Option<bool>,
    /// Whether SMS toll-fraud protection is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_sms_toll_fraud_protection: Option<bool>,
    /// SMS toll-fraud rules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms_toll_fraud_managed_rules: Option<Vec<RecaptchaTollFraudManagedRule>>,
}

impl RecaptchaConfig {
    /// Returns the public JSON representation.
    #[must_use]
    pub fn to_json(&self) -> Value {
        to_json_value(self)
    }
}

/// reCAPTCHA config as exchanged with the backend.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecaptchaServerConfig {
    /// Enforcement state for email/password sign-in.
    #[serde(
        default,
        deserialize_with = "lenient_label",
        skip_serializing_if = "Option::is_none"
    )]
    pub email_password_enforcement_state: Option<RecaptchaProviderEnforcementState>,
    /// Enforcement state for phone sign-in.
    #[serde(
        default,
        deserialize_with = "lenient_label",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone_enforcement_state: Option<RecaptchaProviderEnforcementState>,
    /// Sign-in risk rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub managed_rules: Option<Vec<RecaptchaManagedRule>>,
    /// Backend-populated site keys; never sent.
    #[serde(default, skip_serializing)]
    pub recaptcha_keys: Option<Vec<RecaptchaKey>>,
    /// Whether account defender assessment is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_account_defender: Option<bool>,
    /// Whether SMS bot scoring is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_sms_bot_score: Option<bool>,
    /// Whether SMS toll-fraud protection is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_sms_toll_fraud_protection: Option<bool>,
    /// SMS toll-fraud rules under their wire name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toll_fraud_managed_rules: Option<Vec<RecaptchaTollFraudManagedRule>>,
}

impl From<&RecaptchaConfig> for RecaptchaServerConfig {
    fn from(config: &RecaptchaConfig) -> Self {
        Self {
            email_password_enforcement_state: config.email_password_enforcement_state,
            phone_enforcement_state: config.phone_enforcement_state,
            managed_rules: config.managed_rules.clone(),
            recaptcha_keys: None,
            use_account_defender: config.use_account_defender,
            use_sms_bot_score: config.use_sms_bot_score,
            use_sms_toll_fraud_protection: config.use_sms_toll_fraud_protection,
            toll_fraud_managed_rules: config.sms_toll_fraud_managed_rules.clone(),
        }
    }
}

impl From<RecaptchaServerConfig> for RecaptchaConfig {
    fn from(server: RecaptchaServerConfig) -> Self {
        Self {
            email_password_enforcement_state: server.email_password_enforcement_state,
            phone_enforcement_state: server.phone_enforcement_state,
            managed_rules: server.managed_rules,
            recaptcha_keys: server.recaptcha_keys,
            use_account_defender: server.use_account_defender,
            use_sms_bot_score: server.use_sms_bot_score,
            use_sms_toll_fraud_protection: server.use_sms_toll_fraud_protection,
            sms_toll_fraud_managed_rules: server.toll_fraud_managed_rules,
        }
    }
}

// ============================================================================
// SECTION: Operations
// ============================================================================

/// Validates a public reCAPTCHA config.
///
/// # Errors
///
/// Returns [`AuthConfigError`]: `InvalidConfig` for shape, key, enforcement
/// state, and rule faults; `InvalidArgument` for an empty or non-string
/// enforcement state and non-boolean flags.
pub fn validate(options: &Value) -> Result<RecaptchaConfig, AuthConfigError> {
    let object = ConfigObject::parse(options, || {
        AuthConfigError::invalid_config("\"RecaptchaConfig\" must be a non-null object.")
    })?;
    object.reject_unknown_keys(RECAPTCHA_KEYS, |key| {
        AuthConfigError::invalid_config(format!("\"{key}\" is not a valid RecaptchaConfig parameter."))
    })?;
    Ok(RecaptchaConfig {
        email_password_enforcement_state: enforcement_state(
            object,
            "emailPasswordEnforcementState",
        )?,
        phone_enforcement_state: enforcement_state(object, "phoneEnforcementState")?,
        managed_rules: rule_list(object, "managedRules", "RecaptchaManagedRule", |rule| {
            let (score, action) = validate_rule(rule, "RecaptchaManagedRule", "endScore")?;
            Ok(RecaptchaManagedRule {
                end_score: score,
                action,
            })
        })?,
        recaptcha_keys: rule_list(object, "recaptchaKeys", "RecaptchaKey", validate_key)?,
        use_account_defender: flag(object, "useAccountDefender")?,
        use_sms_bot_score: flag(object, "useSmsBotScore")?,
        use_sms_toll_fraud_protection: flag(object, "useSmsTollFraudProtection")?,
        sms_toll_fraud_managed_rules: rule_list(
            object,
            "smsTollFraudManagedRules",
            "RecaptchaTollFraudManagedRule",
            |rule| {
                let (score, action) =
                    validate_rule(rule, "RecaptchaTollFraudManagedRule", "startScore")?;
                Ok(RecaptchaTollFraudManagedRule {
                    start_score: score,
                    action,
                })
            },
        )?,
    })
}

/// Reads an optional enforcement state.
fn enforcement_state(
    object: ConfigObject<'_>,
    key: &str,
) -> Result<Option<RecaptchaProviderEnforcementState>, AuthConfigError> {
    let Some(value) = object.get(key) else {
        return Ok(None);
    };
    if !validator::is_non_empty_string(value) {
        return Err(AuthConfigError::invalid_argument(format!(
            "\"RecaptchaConfig.{key}\" must be a valid non-empty string."
        )));
    }
    parse_label(value).map(Some).ok_or_else(|| {
        AuthConfigError::invalid_config(format!(
            "\"RecaptchaConfig.{key}\" must be either \"OFF\", \"AUDIT\" or \"ENFORCE\"."
        ))
    })
}

/// Reads an optional boolean flag.
fn flag(object: ConfigObject<'_>, key: &str) -> Result<Option<bool>, AuthConfigError> {
    object.optional_bool(key, || {
        AuthConfigError::invalid_argument(format!(
            "\"RecaptchaConfig.{key}\" must be a boolean value."
        ))
    })
}

/// Reads an optional array, validating each entry with `validate_entry`.
fn rule_list<T>(
    object: ConfigObject<'_>,
    key: &str,
    entry_type: &str,
    validate_entry: impl Fn(&Value) -> Result<T, AuthConfigError>,
) -> Result<Option<Vec<T>>, AuthConfigError> {
    match object.get(key) {
        None => Ok(None),
        Some(Value::Array(items)) => {
            items.iter().map(validate_entry).collect::<Result<Vec<_>, _>>().map(Some)
        }
        Some(_) => Err(AuthConfigError::invalid_config(format!(
            "\"RecaptchaConfig.{key}\" must be an array of valid \"{entry_type}\"."
        ))),
    }
}

/// Validates a score rule keyed by `score_key`, returning its score and action.
fn validate_rule(
    rule: &Value,
    rule_type: &str,
    score_key: &str,
) -> Result<(Option<f64>, Option<RecaptchaAction>), AuthConfigError> {
    let object = ConfigObject::parse(rule, || {
        AuthConfigError::invalid_config(format!("\"{rule_type}\" must be a non-null object."))
    })?;
    object.reject_unknown_keys(&[score_key, "action"], |key| {
        AuthConfigError::invalid_config(format!("\"{key}\" is not a valid {rule_type} parameter."))
    })?;
    let score = match object.get(score_key) {
        None => None,
        Some(value) => Some(value.as_f64().ok_or_else(|| {
            AuthConfigError::invalid_config(format!(
                "\"{rule_type}.{score_key}\" must be a valid number."
            ))
        })?),
    };
    let action = match object.get("action") {
        None => None,
        Some(value) => Some(parse_label::<RecaptchaAction>(value).ok_or_else(|| {
            AuthConfigError::invalid_config(format!("\"{rule_type}.action\" must be \"BLOCK\"."))
        })?),
    };
    Ok((score, action))
}

/// Validates a site key entry.
fn validate_key(entry: &Value) -> Result<RecaptchaKey, AuthConfigError> {
    let object = ConfigObject::parse(entry, || {
        AuthConfigError::invalid_config("\"RecaptchaKey\" must be a non-null object.")
    })?;
    object.reject_unknown_keys(RECAPTCHA_KEY_KEYS, |key| {
        AuthConfigError::invalid_config(format!("\"{key}\" is not a valid RecaptchaKey parameter."))
    })?;
    let key_type = match object.get("type") {
        None => None,
        Some(value) => Some(parse_label::<RecaptchaKeyClientType>(value).ok_or_else(|| {
            AuthConfigError::invalid_config(
                "\"RecaptchaKey.type\" must be either \"WEB\", \"IOS\" or \"ANDROID\".",
            )
        })?),
    };
    let key = object
        .optional_non_empty_string("key", || {
            AuthConfigError::invalid_config("\"RecaptchaKey.key\" must be a valid non-empty string.")
        })?
        .unwrap_or_default();
    Ok(RecaptchaKey {
        key_type,
        key,
    })
}

/// Validates `options` and builds the wire request.
///
/// # Errors
///
/// Returns [`AuthConfigError`] when validation fails.
pub fn build_server_request(options: &Value) -> Result<RecaptchaServerConfig, AuthConfigError> {
    let request = RecaptchaServerConfig::from(&validate(options)?);
    debug!(
        config = "recaptcha",
        managed_rules = request.managed_rules.as_ref().map_or(0, Vec::len),
        toll_fraud_rules = request.toll_fraud_managed_rules.as_ref().map_or(0, Vec::len),
        "built reCAPTCHA request"
    );
    Ok(request)
}

/// Parses a reCAPTCHA config from a server response.
///
/// Enforcement states, actions, and key types this client does not know are
/// dropped.
///
/// # Errors
///
/// Returns an internal [`AuthConfigError`] when the response is not an object
/// or a field has the wrong type.
pub fn parse_server_response(response: &Value) -> Result<RecaptchaConfig, AuthConfigError> {
    let decoded: RecaptchaServerConfig = decode_response(response, RESPONSE_LABEL)?;
    Ok(RecaptchaConfig::from(decoded))
}

// crates/firebase-auth-config/src/password_policy.rs
// ============================================================================
// Module: Password Policy Config
// Description: Password-strength policy validation and wire translation.
// Purpose: Normalize length bounds and emit a fully populated policy version.
// Dependencies: serde, serde_json, tracing
// ============================================================================

//! ## Overview
//! A password policy is either enforced or off. Enforced policies must carry
//! constraints. Validation returns a normalized copy with the length bounds
//! filled in; the caller's input is never modified.
//!
//! The wire request nests constraints inside a single-element
//! `passwordPolicyVersions` list and always sends every strength option,
//! defaulting flags to `false` and lengths to
//! [`MIN_PASSWORD_LENGTH`]/[`MAX_PASSWORD_LENGTH`].
//!
//! ## Invariants
//! - `MIN_PASSWORD_LENGTH <= minLength <= MAX_MIN_PASSWORD_LENGTH`.
//! - `minLength <= maxLength <= MAX_PASSWORD_LENGTH`.

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
use crate::translate::parse_label;
use crate::translate::to_json_value;
use crate::validator;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Smallest allowed minimum password length; also its default.
pub const MIN_PASSWORD_LENGTH: u32 = 6;
/// Largest allowed minimum password length.
pub const MAX_MIN_PASSWORD_LENGTH: u32 = 30;
/// Largest allowed maximum password length; also its default.
pub const MAX_PASSWORD_LENGTH: u32 = 4096;

/// Accepted top-level keys.
const PASSWORD_POLICY_KEYS: &[&str] = &["enforcementState", "forceUpgradeOnSignin", "constraints"];
/// Accepted constraint keys.
const CONSTRAINT_KEYS: &[&str] = &[
    "requireUppercase",
    "requireLowercase",
    "requireNumeric",
    "requireNonAlphanumeric",
    "minLength",
    "maxLength",
];
/// Label used in response contract errors.
const RESPONSE_LABEL: &str = "password policy configuration response";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Whether the password policy is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PasswordPolicyEnforcementState {
    /// Policy enforced at sign-up and sign-in.
    Enforce,
    /// Policy not enforced.
    Off,
}

/// Public password constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomStrengthOptionsConfig {
    /// Require an uppercase character.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_uppercase: Option<bool>,
    /// Require a lowercase character.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_lowercase: Option<bool>,
    /// Require a non-alphanumeric character.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_non_alphanumeric: Option<bool>,
    /// Require a numeric character.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_numeric: Option<bool>,
    /// Minimum password length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    /// Maximum password length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
}

/// Validated and normalized public password policy.
///
/// # Invariants
/// - When `constraints` is set, both length bounds are set.
/// - `Enforce` always carries `constraints`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordPolicyConfig {
    /// Enforcement state.
    pub enforcement_state: PasswordPolicyEnforcementState,
    /// Whether existing users must upgrade non-compliant passwords.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_upgrade_on_signin: Option<bool>,
    /// Password constraints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraints: Option<CustomStrengthOptionsConfig>,
}

/// Wire strength options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomStrengthOptions {
    /// Require an uppercase character.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains_uppercase_character: Option<bool>,
    /// Require a lowercase character.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains_lowercase_character: Option<bool>,
    /// Require a non-alphanumeric character.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains_non_alphanumeric_character: Option<bool>,
    /// Require a numeric character.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains_numeric_character: Option<bool>,
    /// Minimum password length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_password_length: Option<u32>,
    /// Maximum password length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_password_length: Option<u32>,
}

impl From<Option<&CustomStrengthOptionsConfig>> for CustomStrengthOptions {
    fn from(constraints: Option<&CustomStrengthOptionsConfig>) -> Self {
        let constraints = constraints.copied().unwrap_or_default();
        Self {
            contains_uppercase_character: Some(constraints.require_uppercase.unwrap_or(false)),
            contains_lowercase_character: Some(constraints.require_lowercase.unwrap_or(false)),
            contains_non_alphanumeric_character: Some(
                constraints.require_non_alphanumeric.unwrap_or(false),
            ),
            contains_numeric_character: Some(constraints.require_numeric.unwrap_or(false)),
            min_password_length: Some(constraints.min_length.unwrap_or(MIN_PASSWORD_LENGTH)),
            max_password_length: Some(constraints.max_length.unwrap_or(MAX_PASSWORD_LENGTH)),
        }
    }
}

impl From<CustomStrengthOptions> for CustomStrengthOptionsConfig {
    fn from(options: CustomStrengthOptions) -> Self {
        Self {
            require_uppercase: options.contains_uppercase_character,
            require_lowercase: options.contains_lowercase_character,
            require_non_alphanumeric: options.contains_non_alphanumeric_character,
            require_numeric: options.contains_numeric_character,
            min_length: options.min_password_length,
            max_length: options.max_password_length,
        }
    }
}

/// One entry of `passwordPolicyVersions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordPolicyVersion {
    /// Strength options of this version.
    #[serde(default)]
    pub custom_strength_options: CustomStrengthOptions,
}

/// Password policy as exchanged with the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordPolicyServerConfig {
    /// Enforcement state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_policy_enforcement_state: Option<PasswordPolicyEnforcementState>,
    /// Whether existing users must upgrade non-compliant passwords.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_upgrade_on_signin: Option<bool>,
    /// Policy versions; requests carry exactly one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_policy_versions: Option<Vec<PasswordPolicyVersion>>,
}

impl From<&PasswordPolicyConfig> for PasswordPolicyServerConfig {
    fn from(config: &PasswordPolicyConfig) -> Self {
        Self {
            password_policy_enforcement_state: Some(config.enforcement_state),
            force_upgrade_on_signin: Some(config.force_upgrade_on_signin.unwrap_or(false)),
            password_policy_versions: Some(vec![PasswordPolicyVersion {
                custom_strength_options: CustomStrengthOptions::from(config.constraints.as_ref()),
            }]),
        }
    }
}

/// Password policy parsed from a server response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordPolicyAuthConfig {
    /// Enforcement state.
    pub enforcement_state: PasswordPolicyEnforcementState,
    /// Whether existing users must upgrade non-compliant passwords.
    pub force_upgrade_on_signin: bool,
    /// Constraints from the last policy version; empty when none is reported.
    pub constraints: CustomStrengthOptionsConfig,
}

impl PasswordPolicyAuthConfig {
    /// Returns the public JSON representation.
    #[must_use]
    pub fn to_json(&self) -> Value {
        to_json_value(self)
    }
}

// ============================================================================
// SECTION: Operations
// ============================================================================

/// Validates a public password policy and returns a normalized copy.
///
/// # Errors
///
/// Returns [`AuthConfigError`]: `InvalidArgument` when the input is not an
/// object, `InvalidConfig` for every other fault. A missing constraints block
/// on an enforced policy is reported after all field checks.
pub fn validate(options: &Value) -> Result<PasswordPolicyConfig, AuthConfigError> {
    let object = ConfigObject::parse(options, || {
        AuthConfigError::invalid_argument("\"PasswordPolicyConfig\" must be a non-empty object.")
    })?;
    object.reject_unknown_keys(PASSWORD_POLICY_KEYS, |key| {
        AuthConfigError::invalid_config(format!(
            "\"{key}\" is not a valid PasswordPolicyConfig parameter."
        ))
    })?;
    let enforcement_state = object
        .get("enforcementState")
        .and_then(parse_label::<PasswordPolicyEnforcementState>)
        .ok_or_else(|| {
            AuthConfigError::invalid_config(
                "\"PasswordPolicyConfig.enforcementState\" must be either \"ENFORCE\" or \"OFF\".",
            )
        })?;
    let force_upgrade_on_signin = object.optional_bool("forceUpgradeOnSignin", || {
        AuthConfigError::invalid_config(
            "\"PasswordPolicyConfig.forceUpgradeOnSignin\" must be a boolean.",
        )
    })?;
    let constraints = match object.get("constraints") {
        None => None,
        Some(value) => Some(validate_constraints(value)?),
    };
    if enforcement_state == PasswordPolicyEnforcementState::Enforce && constraints.is_none() {
        return Err(AuthConfigError::invalid_config(
            "\"PasswordPolicyConfig.constraints\" must be defined.",
        ));
    }
    Ok(PasswordPolicyConfig {
        enforcement_state,
        force_upgrade_on_signin,
        constraints,
    })
}

/// Validates the constraints block and fills in the length defaults.
fn validate_constraints(value: &Value) -> Result<CustomStrengthOptionsConfig, AuthConfigError> {
    let object = ConfigObject::parse(value, || {
        AuthConfigError::invalid_config("\"PasswordPolicyConfig.constraints\" must be a non-empty object.")
    })?;
    object.reject_unknown_keys(CONSTRAINT_KEYS, |key| {
        AuthConfigError::invalid_config(format!(
            "\"{key}\" is not a valid PasswordPolicyConfig.constraints parameter."
        ))
    })?;
    let requirement = |key: &str| {
        object.optional_bool(key, || {
            AuthConfigError::invalid_config(format!(
                "\"PasswordPolicyConfig.constraints.{key}\" must be a boolean."
            ))
        })
    };
    let require_uppercase = requirement("requireUppercase")?;
    let require_lowercase = requirement("requireLowercase")?;
    let require_numeric = requirement("requireNumeric")?;
    let require_non_alphanumeric = requirement("requireNonAlphanumeric")?;

    for key in ["minLength", "maxLength"] {
        if object.contains(key) && !validator::is_number(object.get(key)) {
            return Err(AuthConfigError::invalid_config(format!(
                "\"PasswordPolicyConfig.constraints.{key}\" must be a number."
            )));
        }
    }
    let min_length = match object.get("minLength") {
        None => MIN_PASSWORD_LENGTH,
        Some(value) => length(value)
            .filter(|min| (MIN_PASSWORD_LENGTH..=MAX_MIN_PASSWORD_LENGTH).contains(min))
            .ok_or_else(|| {
                AuthConfigError::invalid_config(format!(
                    "\"PasswordPolicyConfig.constraints.minLength\" must be an integer between \
                     {MIN_PASSWORD_LENGTH} and {MAX_MIN_PASSWORD_LENGTH}, inclusive."
                ))
            })?,
    };
    let max_length = match object.get("maxLength") {
        None => MAX_PASSWORD_LENGTH,
        Some(value) => length(value)
            .filter(|max| (min_length..=MAX_PASSWORD_LENGTH).contains(max))
            .ok_or_else(|| {
                AuthConfigError::invalid_config(format!(
                    "\"PasswordPolicyConfig.constraints.maxLength\" must be greater than or equal \
                     to minLength and at max {MAX_PASSWORD_LENGTH}."
                ))
            })?,
    };
    Ok(CustomStrengthOptionsConfig {
        require_uppercase,
        require_lowercase,
        require_non_alphanumeric,
        require_numeric,
        min_length: Some(min_length),
        max_length: Some(max_length),
    })
}

/// Reads a non-negative integral length.
fn length(value: &Value) -> Option<u32> {
    if !validator::is_integer(value) {
        return None;
    }
    value.as_u64().and_then(|raw| u32::try_from(raw).ok())
}

/// Validates `options` and builds the wire request.
///
/// # Errors
///
/// Returns [`AuthConfigError`] when validation fails.
pub fn build_server_request(options: &Value) -> Result<PasswordPolicyServerConfig, AuthConfigError> {
    let config = validate(options)?;
    let request = PasswordPolicyServerConfig::from(&config);
    debug!(
        config = "password_policy",
        enforced = config.enforcement_state == PasswordPolicyEnforcementState::Enforce,
        "built password policy request"
    );
    Ok(request)
}

/// Parses a password policy from a server response.
///
/// Constraints come from the last reported policy version.
///
/// # Errors
///
/// Returns an internal [`AuthConfigError`] when
/// `passwordPolicyEnforcementState` is missing or unrecognized.
pub fn parse_server_response(response: &Value) -> Result<PasswordPolicyAuthConfig, AuthConfigError> {
    let decoded: PasswordPolicyServerConfig = decode_response(response, RESPONSE_LABEL)?;
    let Some(enforcement_state) = decoded.password_policy_enforcement_state else {
        return Err(contract_violation(RESPONSE_LABEL, "missing passwordPolicyEnforcementState"));
    };
    let constraints = decoded
        .password_policy_versions
        .unwrap_or_default()
        .last()
        .map(|version| CustomStrengthOptionsConfig::from(version.custom_strength_options))
        .unwrap_or_default();
    Ok(PasswordPolicyAuthConfig {
        enforcement_state,
        force_upgrade_on_signin: decoded.force_upgrade_on_signin.unwrap_or(false),
        constraints,
    })
}

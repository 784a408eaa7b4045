// crates/firebase-auth-config/src/sms_region.rs
// ============================================================================
// Module: SMS Region Config
// Description: SMS region allow/deny policy validation and translation.
// Purpose: Enforce that exactly one region policy variant is configured.
// Dependencies: serde, serde_json, tracing
// ============================================================================

//! ## Overview
//! A region policy either allows every region except a deny list
//! (`allowByDefault`) or allows only an allow list (`allowlistOnly`). The
//! two variants are mutually exclusive; an empty region list is valid for
//! either. The wire shape matches the public shape.

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
use crate::translate::display_value;
use crate::translate::to_json_value;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Accepted top-level keys.
const SMS_REGION_KEYS: &[&str] = &["allowByDefault", "allowlistOnly"];
/// Label used in response contract errors.
const RESPONSE_LABEL: &str = "SMS region configuration response";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Allow every region except the listed ones.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllowByDefault {
    /// ISO region codes to deny.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disallowed_regions: Option<Vec<String>>,
}

/// Allow only the listed regions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllowlistOnly {
    /// ISO region codes to allow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_regions: Option<Vec<String>>,
}

/// SMS region policy; also the wire request shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SmsRegionConfig {
    /// Deny-list policy.
    AllowByDefault(AllowByDefault),
    /// Allow-list policy.
    AllowlistOnly(AllowlistOnly),
}

impl SmsRegionConfig {
    /// Returns the public JSON representation.
    #[must_use]
    pub fn to_json(&self) -> Value {
        to_json_value(self)
    }
}

/// SMS region response body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SmsRegionResponse {
    /// Deny-list policy.
    #[serde(default)]
    allow_by_default: Option<AllowByDefault>,
    /// Allow-list policy.
    #[serde(default)]
    allowlist_only: Option<AllowlistOnly>,
}

// ============================================================================
// SECTION: Operations
// ============================================================================

/// Validates a public SMS region policy.
///
/// Returns `Ok(None)` for an empty object, which leaves the policy unchanged.
///
/// # Errors
///
/// Returns an `InvalidConfig` [`AuthConfigError`] for a bad shape, unknown
/// keys, non-string regions, or both variants at once.
pub fn validate(options: &Value) -> Result<Option<SmsRegionConfig>, AuthConfigError> {
    let object = ConfigObject::parse(options, || {
        AuthConfigError::invalid_config("\"SmsRegionConfig\" must be a non-null object.")
    })?;
    object.reject_unknown_keys(SMS_REGION_KEYS, |key| {
        AuthConfigError::invalid_config(format!("\"{key}\" is not a valid SmsRegionConfig parameter."))
    })?;
    let allow_by_default = match object.get("allowByDefault") {
        None => None,
        Some(value) => Some(AllowByDefault {
            disallowed_regions: validate_regions(value, "allowByDefault", "disallowedRegions")?,
        }),
    };
    let allowlist_only = match object.get("allowlistOnly") {
        None => None,
        Some(value) => Some(AllowlistOnly {
            allowed_regions: validate_regions(value, "allowlistOnly", "allowedRegions")?,
        }),
    };
    match (allow_by_default, allowlist_only) {
        (Some(_), Some(_)) => Err(AuthConfigError::invalid_config(
            "SmsRegionConfig cannot have both \"allowByDefault\" and \"allowlistOnly\" parameters.",
        )),
        (Some(policy), None) => Ok(Some(SmsRegionConfig::AllowByDefault(policy))),
        (None, Some(policy)) => Ok(Some(SmsRegionConfig::AllowlistOnly(policy))),
        (None, None) => Ok(None),
    }
}

/// Validates a variant object holding a single optional region list.
fn validate_regions(
    value: &Value,
    variant: &str,
    list_key: &str,
) -> Result<Option<Vec<String>>, AuthConfigError> {
    let object = ConfigObject::parse(value, || {
        AuthConfigError::invalid_config(format!(
            "\"SmsRegionConfig.{variant}\" must be a non-null object."
        ))
    })?;
    object.reject_unknown_keys(&[list_key], |key| {
        AuthConfigError::invalid_config(format!(
            "\"{key}\" is not a valid SmsRegionConfig.{variant} parameter."
        ))
    })?;
    let Some(list) = object.get(list_key) else {
        return Ok(None);
    };
    let Value::Array(items) = list else {
        return Err(AuthConfigError::invalid_config(format!(
            "\"SmsRegionConfig.{variant}.{list_key}\" must be a valid string array."
        )));
    };
    items
        .iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                AuthConfigError::invalid_config(format!(
                    "{} is not a valid string.",
                    display_value(item)
                ))
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

/// Validates `options` and builds the wire request.
///
/// # Errors
///
/// Returns [`AuthConfigError`] when validation fails.
pub fn build_server_request(options: &Value) -> Result<Option<SmsRegionConfig>, AuthConfigError> {
    let request = validate(options)?;
    debug!(
        config = "sms_region",
        has_policy = request.is_some(),
        "built SMS region request"
    );
    Ok(request)
}

/// Parses an SMS region policy from a server response.
///
/// An empty response means no policy is set. When the backend reports both
/// variants the deny-list policy wins.
///
/// # Errors
///
/// Returns an internal [`AuthConfigError`] when the response is not an object
/// or a variant is malformed.
pub fn parse_server_response(response: &Value) -> Result<Option<SmsRegionConfig>, AuthConfigError> {
    let decoded: SmsRegionResponse = decode_response(response, RESPONSE_LABEL)?;
    match (decoded.allow_by_default, decoded.allowlist_only) {
        (Some(policy), allowlist) => {
            if allowlist.is_some() {
                debug!(config = "sms_region", "dropping allowlistOnly alongside allowByDefault");
            }
            Ok(Some(SmsRegionConfig::AllowByDefault(policy)))
        }
        (None, Some(policy)) => Ok(Some(SmsRegionConfig::AllowlistOnly(policy))),
        (None, None) => Ok(None),
    }
}

#[cfg(test)]
mod tests;

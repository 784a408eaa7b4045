// crates/firebase-auth-config/src/mobile_links.rs
// ============================================================================
// Module: Mobile Links Config
// Description: Domain selection for mobile action links.
// Dependencies: serde, serde_json, tracing
// ============================================================================

//! ## Overview
//! Chooses which domain hosts out-of-band action links opened on mobile
//! devices. The wire shape matches the public shape. A domain this client
//! does not recognize is dropped from parsed responses.

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

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Accepted keys.
const MOBILE_LINKS_KEYS: &[&str] = &["domain"];
/// Label used in response contract errors.
const RESPONSE_LABEL: &str = "mobile links configuration response";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Domain used for mobile action links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MobileLinksDomain {
    /// Firebase Hosting domain.
    HostingDomain,
    /// Firebase Dynamic Links domain.
    FirebaseDynamicLinkDomain,
}

/// Mobile links settings; public, wire, and parsed shapes coincide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileLinksConfig {
    /// Link domain.
    #[serde(
        default,
        deserialize_with = "lenient_label",
        skip_serializing_if = "Option::is_none"
    )]
    pub domain: Option<MobileLinksDomain>,
}

impl MobileLinksConfig {
    /// Returns the public JSON representation.
    #[must_use]
    pub fn to_json(&self) -> Value {
        to_json_value(self)
    }
}

// ============================================================================
// SECTION: Operations
// ============================================================================

/// Validates public mobile links settings.
///
/// # Errors
///
/// Returns an `InvalidArgument` [`AuthConfigError`] for a non-object input,
/// unknown keys, or an unrecognized domain.
pub fn validate(options: &Value) -> Result<MobileLinksConfig, AuthConfigError> {
    let object = ConfigObject::parse(options, || {
        AuthConfigError::invalid_argument("\"MobileLinksConfig\" must be a non-null object.")
    })?;
    object.reject_unknown_keys(MOBILE_LINKS_KEYS, |key| {
        AuthConfigError::invalid_argument(format!(
            "\"{key}\" is not a valid \"MobileLinksConfig\" parameter."
        ))
    })?;
    let domain = match object.get("domain") {
        None => None,
        Some(value) => Some(parse_label::<MobileLinksDomain>(value).ok_or_else(|| {
            AuthConfigError::invalid_argument(
                "\"MobileLinksConfig.domain\" must be either \"HOSTING_DOMAIN\" or \
                 \"FIREBASE_DYNAMIC_LINK_DOMAIN\".",
            )
        })?),
    };
    Ok(MobileLinksConfig {
        domain,
    })
}

/// Validates `options` and builds the wire request.
///
/// # Errors
///
/// Returns [`AuthConfigError`] when validation fails.
pub fn build_server_request(options: &Value) -> Result<MobileLinksConfig, AuthConfigError> {
    let request = validate(options)?;
    debug!(config = "mobile_links", has_domain = request.domain.is_some(), "built mobile links request");
    Ok(request)
}

/// Parses mobile links settings from a server response.
///
/// # Errors
///
/// Returns an internal [`AuthConfigError`] when the response is not an object.
pub fn parse_server_response(response: &Value) -> Result<MobileLinksConfig, AuthConfigError> {
    decode_response(response, RESPONSE_LABEL)
}

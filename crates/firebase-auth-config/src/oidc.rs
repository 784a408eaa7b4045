// crates/firebase-auth-config/src/oidc.rs
// ============================================================================
// Module: OIDC Provider Config
// Description: OpenID Connect provider validation and wire translation.
// Purpose: Enforce client, issuer, and response-type rules for OIDC providers.
// Dependencies: regex, serde, serde_json, tracing
// ============================================================================

//! ## Overview
//! OIDC providers use the `oidc.` prefix. The public shape and the wire
//! shape are nearly identical; the difference is the resource name, which
//! carries the provider ID on responses.
//!
//! Response-type rules: `idToken` and `code` must be booleans, exactly one
//! may be enabled when both are supplied, and the code flow requires a
//! client secret.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::AuthConfigError;
use crate::error::AuthErrorCode;
use crate::object::ConfigObject;
use crate::translate::RequestMode;
use crate::translate::contract_violation;
use crate::translate::decode_response;
use crate::translate::to_json_value;
use crate::validator;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Provider ID prefix for OIDC providers.
pub const OIDC_PROVIDER_PREFIX: &str = "oidc.";

/// Accepted top-level keys.
const OIDC_KEYS: &[&str] =
    &["enabled", "displayName", "providerId", "clientId", "issuer", "clientSecret", "responseType"];
/// Accepted response-type keys.
const RESPONSE_TYPE_KEYS: &[&str] = &["idToken", "code"];
/// Label used in response contract errors.
const RESPONSE_LABEL: &str = "OIDC configuration response";
/// Message shared by every provider ID fault.
const PROVIDER_ID_MESSAGE: &str =
    "\"OIDCAuthProviderConfig.providerId\" must be a valid non-empty string prefixed with \"oidc.\".";

/// Trailing `oauthIdpConfigs/oidc.*` segment of a resource name.
static RESOURCE_NAME_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"/oauthIdpConfigs/(oidc\..*)$").ok());

// ============================================================================
// SECTION: Types
// ============================================================================

/// OAuth response types requested from the identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthResponseType {
    /// Implicit flow returning an ID token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_token: Option<bool>,
    /// Authorization code flow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<bool>,
}

impl OAuthResponseType {
    /// Returns true when the code flow is enabled.
    #[must_use]
    pub fn code_flow(self) -> bool {
        self.code == Some(true)
    }
}

/// Validated public OIDC provider settings.
///
/// # Invariants
/// - `provider_id`, when set, starts with [`OIDC_PROVIDER_PREFIX`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OidcConfigOptions {
    /// Provider ID.
    pub provider_id: Option<String>,
    /// Whether the provider is enabled.
    pub enabled: Option<bool>,
    /// Display name.
    pub display_name: Option<String>,
    /// OAuth client ID.
    pub client_id: Option<String>,
    /// Issuer URL.
    pub issuer: Option<String>,
    /// OAuth client secret.
    pub client_secret: Option<String>,
    /// Requested response types.
    pub response_type: Option<OAuthResponseType>,
}

/// OIDC create/update request body.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OidcConfigRequest {
    /// Whether the provider is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Issuer URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    /// OAuth client ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    /// OAuth client secret.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
    /// Requested response types.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_type: Option<OAuthResponseType>,
}

impl From<&OidcConfigOptions> for OidcConfigRequest {
    fn from(options: &OidcConfigOptions) -> Self {
        Self {
            enabled: options.enabled,
            display_name: options.display_name.clone(),
            issuer: options.issuer.clone(),
            client_id: options.client_id.clone(),
            client_secret: options.client_secret.clone(),
            response_type: options.response_type,
        }
    }
}

/// OIDC response body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OidcConfigResponse {
    /// Resource name.
    #[serde(default)]
    name: Option<String>,
    /// Whether the provider is enabled.
    #[serde(default)]
    enabled: Option<bool>,
    /// Display name.
    #[serde(default)]
    display_name: Option<String>,
    /// Issuer URL.
    #[serde(default)]
    issuer: Option<String>,
    /// OAuth client ID.
    #[serde(default)]
    client_id: Option<String>,
    /// OAuth client secret.
    #[serde(default)]
    client_secret: Option<String>,
    /// Requested response types.
    #[serde(default)]
    response_type: Option<OAuthResponseType>,
}

/// OIDC provider parsed from a server response.
///
/// # Invariants
/// - `provider_id` starts with [`OIDC_PROVIDER_PREFIX`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OidcConfig {
    /// Whether the provider is enabled (`false` when the backend omits it).
    pub enabled: bool,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Provider ID.
    pub provider_id: String,
    /// Issuer URL.
    pub issuer: String,
    /// OAuth client ID.
    pub client_id: String,
    /// OAuth client secret.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
    /// Requested response types.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_type: Option<OAuthResponseType>,
}

impl OidcConfig {
    /// Returns the public JSON representation.
    #[must_use]
    pub fn to_json(&self) -> Value {
        to_json_value(self)
    }
}

// ============================================================================
// SECTION: Identity Helpers
// ============================================================================

/// Extracts an `oidc.` provider ID from a resource name of the form
/// `projects/<project>/oauthIdpConfigs/<providerId>`.
#[must_use]
pub fn provider_id_from_resource_name(resource_name: &str) -> Option<String> {
    RESOURCE_NAME_PATTERN
        .as_ref()?
        .captures(resource_name)?
        .get(1)
        .map(|id| id.as_str().to_string())
}

/// Returns true for a non-empty string prefixed with `oidc.`.
#[must_use]
pub fn is_provider_id(value: &Value) -> bool {
    value.as_str().is_some_and(is_provider_id_str)
}

/// String form of [`is_provider_id`].
#[must_use]
pub fn is_provider_id_str(provider_id: &str) -> bool {
    provider_id.starts_with(OIDC_PROVIDER_PREFIX)
}

// ============================================================================
// SECTION: Operations
// ============================================================================

/// Validates public OIDC settings.
///
/// # Errors
///
/// Returns [`AuthConfigError`] on the first violation. Codes distinguish a
/// missing value (`MissingOauthClientId`, `MissingIssuer`) from a malformed
/// one; response-type faults use `InvalidOauthResponseType` and
/// `MissingOauthClientSecret`.
pub fn validate(options: &Value, mode: RequestMode) -> Result<OidcConfigOptions, AuthConfigError> {
    let object = ConfigObject::parse(options, || {
        AuthConfigError::invalid_config("\"OIDCAuthProviderConfig\" must be a valid non-null object.")
    })?;
    object.reject_unknown_keys(OIDC_KEYS, |key| {
        AuthConfigError::invalid_config(format!("\"{key}\" is not a valid OIDC config parameter."))
    })?;

    // A supplied providerId is checked in both modes; only an absent key is skipped on update.
    let provider_id = match object.get("providerId") {
        None if mode.is_update() => None,
        None => {
            return Err(AuthConfigError::new(AuthErrorCode::MissingProviderId, PROVIDER_ID_MESSAGE));
        }
        Some(value) => match value.as_str().filter(|id| !id.is_empty()) {
            Some(id) if is_provider_id_str(id) => Some(id.to_string()),
            _ => {
                let code = if mode.is_update() || validator::is_truthy(Some(value)) {
                    AuthErrorCode::InvalidProviderId
                } else {
                    AuthErrorCode::MissingProviderId
                };
                return Err(AuthConfigError::new(code, PROVIDER_ID_MESSAGE));
            }
        },
    };

    let client_id = object.get("clientId");
    if object.needs_check("clientId", mode) && !validator::is_non_empty_string(client_id) {
        let code = if validator::is_truthy(client_id) {
            AuthErrorCode::InvalidOauthClientId
        } else {
            AuthErrorCode::MissingOauthClientId
        };
        return Err(AuthConfigError::new(
            code,
            "\"OIDCAuthProviderConfig.clientId\" must be a valid non-empty string.",
        ));
    }
    let issuer = object.get("issuer");
    if object.needs_check("issuer", mode) && !validator::is_url(issuer) {
        let code = if validator::is_truthy(issuer) {
            AuthErrorCode::InvalidConfig
        } else {
            AuthErrorCode::MissingIssuer
        };
        return Err(AuthConfigError::new(
            code,
            "\"OIDCAuthProviderConfig.issuer\" must be a valid URL string.",
        ));
    }
    let client_secret = object.optional_non_empty_string("clientSecret", || {
        AuthConfigError::invalid_config(
            "\"OIDCAuthProviderConfig.clientSecret\" must be a valid string.",
        )
    })?;
    let enabled = object.optional_bool("enabled", || {
        AuthConfigError::invalid_config("\"OIDCAuthProviderConfig.enabled\" must be a boolean.")
    })?;
    let display_name = object.optional_string("displayName", || {
        AuthConfigError::invalid_config(
            "\"OIDCAuthProviderConfig.displayName\" must be a valid string.",
        )
    })?;
    let response_type = match object.get("responseType") {
        None => None,
        Some(value) => Some(validate_response_type(value, client_secret.is_some())?),
    };

    Ok(OidcConfigOptions {
        provider_id,
        enabled,
        display_name,
        client_id: client_id.and_then(Value::as_str).map(str::to_string),
        issuer: issuer.and_then(Value::as_str).map(str::to_string),
        client_secret,
        response_type,
    })
}

/// Validates the `responseType` object.
fn validate_response_type(
    value: &Value,
    has_client_secret: bool,
) -> Result<OAuthResponseType, AuthConfigError> {
    let object = ConfigObject::parse(value, || {
        AuthConfigError::invalid_config(
            "\"OIDCAuthProviderConfig.responseType\" must be a valid object.",
        )
    })?;
    object.reject_unknown_keys(RESPONSE_TYPE_KEYS, |key| {
        AuthConfigError::invalid_config(format!(
            "\"{key}\" is not a valid OAuthResponseType parameter."
        ))
    })?;
    let response_type = OAuthResponseType {
        id_token: object.optional_bool("idToken", || {
            AuthConfigError::invalid_argument(
                "\"OIDCAuthProviderConfig.responseType.idToken\" must be a boolean.",
            )
        })?,
        code: object.optional_bool("code", || {
            AuthConfigError::invalid_argument(
                "\"OIDCAuthProviderConfig.responseType.code\" must be a boolean.",
            )
        })?,
    };
    let enabled_count = [response_type.id_token, response_type.code]
        .into_iter()
        .filter(|flag| *flag == Some(true))
        .count();
    if object.len() == RESPONSE_TYPE_KEYS.len() && enabled_count != 1 {
        return Err(AuthConfigError::new(
            AuthErrorCode::InvalidOauthResponseType,
            "Only exactly one OAuth responseType should be set to true.",
        ));
    }
    if response_type.code_flow() && !has_client_secret {
        return Err(AuthConfigError::new(
            AuthErrorCode::MissingOauthClientSecret,
            "The OAuth configuration client secret is required to enable OIDC code flow.",
        ));
    }
    Ok(response_type)
}

/// Validates `options` and builds the wire request.
///
/// Returns `Ok(None)` when the input is not an object, or is a create
/// request without a provider ID.
///
/// # Errors
///
/// Returns [`AuthConfigError`] when validation fails.
pub fn build_server_request(
    options: &Value,
    mode: RequestMode,
) -> Result<Option<OidcConfigRequest>, AuthConfigError> {
    let applicable = validator::is_object(options)
        && (mode.is_update() || validator::is_truthy(options.get("providerId")));
    if !applicable {
        return Ok(None);
    }
    let request = OidcConfigRequest::from(&validate(options, mode)?);
    debug!(
        config = "oidc",
        mode = mode.as_str(),
        code_flow = request.response_type.is_some_and(OAuthResponseType::code_flow),
        "built OIDC provider request"
    );
    Ok(Some(request))
}

/// Parses an OIDC provider from a server response.
///
/// # Errors
///
/// Returns an internal [`AuthConfigError`] when the resource name, issuer, or
/// client ID is missing.
pub fn parse_server_response(response: &Value) -> Result<OidcConfig, AuthConfigError> {
    let decoded: OidcConfigResponse = decode_response(response, RESPONSE_LABEL)?;
    let provider_id = decoded
        .name
        .as_deref()
        .and_then(provider_id_from_resource_name)
        .ok_or_else(|| contract_violation(RESPONSE_LABEL, "missing or malformed name"))?;
    let issuer = decoded
        .issuer
        .filter(|issuer| !issuer.is_empty())
        .ok_or_else(|| contract_violation(RESPONSE_LABEL, "missing issuer"))?;
    let client_id = decoded
        .client_id
        .filter(|client_id| !client_id.is_empty())
        .ok_or_else(|| contract_violation(RESPONSE_LABEL, "missing clientId"))?;
    Ok(OidcConfig {
        enabled: decoded.enabled.unwrap_or(false),
        display_name: decoded.display_name,
        provider_id,
        issuer,
        client_id,
        client_secret: decoded.client_secret,
        response_type: decoded.response_type,
    })
}

// crates/firebase-auth-config/src/saml.rs
// ============================================================================
// Module: SAML Provider Config
// Description: SAML identity-provider validation and wire translation.
// Purpose: Translate between the flat public shape and nested idp/sp configs.
// Dependencies: regex, serde, serde_json, tracing
// ============================================================================

//! ## Overview
//! Public SAML configs are flat; the backend nests identity-provider fields
//! under `idpConfig` and relying-party fields under `spConfig`. Provider IDs
//! carry the `saml.` prefix, which is also how an ID is recovered from a
//! resource name such as `projects/p/inboundSamlConfigs/saml.provider`.
//!
//! Response parsing has no tolerance: any missing guaranteed field is an
//! internal error.

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

/// Provider ID prefix for SAML providers.
pub const SAML_PROVIDER_PREFIX: &str = "saml.";

/// Accepted top-level keys.
const SAML_KEYS: &[&str] = &[
    "enabled",
    "displayName",
    "providerId",
    "idpEntityId",
    "ssoURL",
    "x509Certificates",
    "rpEntityId",
    "callbackURL",
    "enableRequestSigning",
];
/// Label used in response contract errors.
const RESPONSE_LABEL: &str = "SAML configuration response";
/// Message shared by every provider ID fault.
const PROVIDER_ID_MESSAGE: &str =
    "\"SAMLAuthProviderConfig.providerId\" must be a valid non-empty string prefixed with \"saml.\".";
/// Message shared by every certificate fault.
const CERTIFICATES_MESSAGE: &str =
    "\"SAMLAuthProviderConfig.x509Certificates\" must be a valid array of X509 certificate strings.";

/// Trailing `inboundSamlConfigs/saml.*` segment of a resource name.
static RESOURCE_NAME_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"/inboundSamlConfigs/(saml\..*)$").ok());

// ============================================================================
// SECTION: Types
// ============================================================================

/// Validated public SAML provider settings.
///
/// # Invariants
/// - `provider_id`, when set, starts with [`SAML_PROVIDER_PREFIX`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SamlConfigOptions {
    /// Provider ID.
    pub provider_id: Option<String>,
    /// Whether the provider is enabled.
    pub enabled: Option<bool>,
    /// Display name.
    pub display_name: Option<String>,
    /// IdP entity ID.
    pub idp_entity_id: Option<String>,
    /// IdP single sign-on URL.
    pub sso_url: Option<String>,
    /// IdP signing certificates.
    pub x509_certificates: Option<Vec<String>>,
    /// Relying-party entity ID.
    pub rp_entity_id: Option<String>,
    /// Relying-party callback URL.
    pub callback_url: Option<String>,
    /// Whether authentication requests are signed.
    pub enable_request_signing: Option<bool>,
}

/// IdP certificate entry on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SamlIdpCertificate {
    /// PEM certificate body; empty when the backend omits it.
    #[serde(default)]
    pub x509_certificate: String,
}

/// Identity-provider block on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SamlIdpConfig {
    /// IdP entity ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idp_entity_id: Option<String>,
    /// IdP single sign-on URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sso_url: Option<String>,
    /// Whether requests are signed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sign_request: Option<bool>,
    /// IdP certificates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idp_certificates: Option<Vec<SamlIdpCertificate>>,
}

/// Relying-party block on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SamlSpConfig {
    /// Relying-party entity ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sp_entity_id: Option<String>,
    /// Relying-party callback URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_uri: Option<String>,
}

/// SAML create/update request body.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SamlConfigRequest {
    /// Whether the provider is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Identity-provider block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idp_config: Option<SamlIdpConfig>,
    /// Relying-party block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sp_config: Option<SamlSpConfig>,
}

impl From<&SamlConfigOptions> for SamlConfigRequest {
    fn from(options: &SamlConfigOptions) -> Self {
        let has_idp_fields = options.idp_entity_id.is_some()
            || options.sso_url.is_some()
            || options.x509_certificates.is_some()
            || options.enable_request_signing.is_some();
        let idp_config = has_idp_fields.then(|| SamlIdpConfig {
            idp_entity_id: options.idp_entity_id.clone(),
            sso_url: options.sso_url.clone(),
            sign_request: options.enable_request_signing,
            idp_certificates: options.x509_certificates.as_ref().map(|certs| {
                certs
                    .iter()
                    .map(|cert| SamlIdpCertificate {
                        x509_certificate: cert.clone(),
                    })
                    .collect()
            }),
        });
        let sp_config = (options.rp_entity_id.is_some() || options.callback_url.is_some()).then(
            || SamlSpConfig {
                sp_entity_id: options.rp_entity_id.clone(),
                callback_uri: options.callback_url.clone(),
            },
        );
        Self {
            enabled: options.enabled,
            display_name: options.display_name.clone(),
            idp_config,
            sp_config,
        }
    }
}

/// SAML response body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SamlConfigResponse {
    /// Resource name.
    #[serde(default)]
    name: Option<String>,
    /// Whether the provider is enabled.
    #[serde(default)]
    enabled: Option<bool>,
    /// Display name.
    #[serde(default)]
    display_name: Option<String>,
    /// Identity-provider block.
    #[serde(default)]
    idp_config: Option<SamlIdpConfig>,
    /// Relying-party block.
    #[serde(default)]
    sp_config: Option<SamlSpConfig>,
}

/// SAML provider parsed from a server response.
///
/// # Invariants
/// - `provider_id` starts with [`SAML_PROVIDER_PREFIX`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SamlConfig {
    /// Whether the provider is enabled (`false` when the backend omits it).
    pub enabled: bool,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Provider ID.
    pub provider_id: String,
    /// IdP entity ID.
    pub idp_entity_id: String,
    /// IdP single sign-on URL.
    #[serde(rename = "ssoURL")]
    pub sso_url: String,
    /// IdP signing certificates.
    pub x509_certificates: Vec<String>,
    /// Relying-party entity ID.
    pub rp_entity_id: String,
    /// Relying-party callback URL.
    #[serde(rename = "callbackURL", skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    /// Whether authentication requests are signed.
    pub enable_request_signing: bool,
}

impl SamlConfig {
    /// Returns the public JSON representation.
    #[must_use]
    pub fn to_json(&self) -> Value {
        to_json_value(self)
    }
}

// ============================================================================
// SECTION: Identity Helpers
// ============================================================================

/// Extracts a `saml.` provider ID from a resource name of the form
/// `projects/<project>/inboundSamlConfigs/<providerId>`.
#[must_use]
pub fn provider_id_from_resource_name(resource_name: &str) -> Option<String> {
    RESOURCE_NAME_PATTERN
        .as_ref()?
        .captures(resource_name)?
        .get(1)
        .map(|id| id.as_str().to_string())
}

/// Returns true for a non-empty string prefixed with `saml.`.
#[must_use]
pub fn is_provider_id(value: &Value) -> bool {
    value.as_str().is_some_and(is_provider_id_str)
}

/// String form of [`is_provider_id`].
#[must_use]
pub fn is_provider_id_str(provider_id: &str) -> bool {
    provider_id.starts_with(SAML_PROVIDER_PREFIX)
}

// ============================================================================
// SECTION: Operations
// ============================================================================

/// Validates public SAML settings.
///
/// In [`RequestMode::Create`] every identity and relying-party field is
/// required; in [`RequestMode::Update`] absent fields are skipped.
///
/// # Errors
///
/// Returns [`AuthConfigError`] on the first violation: `InvalidConfig` for
/// shape and type faults, `MissingProviderId`/`InvalidProviderId` for the
/// provider ID, and `MissingSamlRelyingPartyConfig` for missing IdP or
/// relying-party fields.
pub fn validate(options: &Value, mode: RequestMode) -> Result<SamlConfigOptions, AuthConfigError> {
    let object = ConfigObject::parse(options, || {
        AuthConfigError::invalid_config("\"SAMLAuthProviderConfig\" must be a valid non-null object.")
    })?;
    object.reject_unknown_keys(SAML_KEYS, |key| {
        AuthConfigError::invalid_config(format!("\"{key}\" is not a valid SAML config parameter."))
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

    if object.needs_check("idpEntityId", mode)
        && !validator::is_non_empty_string(object.get("idpEntityId"))
    {
        return Err(AuthConfigError::new(
            AuthErrorCode::MissingSamlRelyingPartyConfig,
            "\"SAMLAuthProviderConfig.idpEntityId\" must be a valid non-empty string.",
        ));
    }
    if object.needs_check("ssoURL", mode) && !validator::is_url(object.get("ssoURL")) {
        return Err(AuthConfigError::new(
            AuthErrorCode::MissingSamlRelyingPartyConfig,
            "\"SAMLAuthProviderConfig.ssoURL\" must be a valid URL string.",
        ));
    }
    if object.needs_check("rpEntityId", mode)
        && !validator::is_non_empty_string(object.get("rpEntityId"))
    {
        let code = if validator::is_truthy(object.get("rpEntityId")) {
            AuthErrorCode::InvalidConfig
        } else {
            AuthErrorCode::MissingSamlRelyingPartyConfig
        };
        return Err(AuthConfigError::new(
            code,
            "\"SAMLAuthProviderConfig.rpEntityId\" must be a valid non-empty string.",
        ));
    }
    if object.needs_check("callbackURL", mode) && !validator::is_url(object.get("callbackURL")) {
        return Err(AuthConfigError::invalid_config(
            "\"SAMLAuthProviderConfig.callbackURL\" must be a valid URL string.",
        ));
    }
    let x509_certificates = match object.get("x509Certificates") {
        None if mode.is_update() => None,
        Some(Value::Array(certs)) => Some(
            certs
                .iter()
                .map(|cert| {
                    cert.as_str()
                        .filter(|text| !text.is_empty())
                        .map(str::to_string)
                        .ok_or_else(|| AuthConfigError::invalid_config(CERTIFICATES_MESSAGE))
                })
                .collect::<Result<Vec<_>, _>>()?,
        ),
        _ => return Err(AuthConfigError::invalid_config(CERTIFICATES_MESSAGE)),
    };
    let enable_request_signing = object.optional_bool("enableRequestSigning", || {
        AuthConfigError::invalid_config(
            "\"SAMLAuthProviderConfig.enableRequestSigning\" must be a boolean.",
        )
    })?;
    let enabled = object.optional_bool("enabled", || {
        AuthConfigError::invalid_config("\"SAMLAuthProviderConfig.enabled\" must be a boolean.")
    })?;
    let display_name = object.optional_string("displayName", || {
        AuthConfigError::invalid_config(
            "\"SAMLAuthProviderConfig.displayName\" must be a valid string.",
        )
    })?;

    Ok(SamlConfigOptions {
        provider_id,
        enabled,
        display_name,
        idp_entity_id: string_field(object, "idpEntityId"),
        sso_url: string_field(object, "ssoURL"),
        x509_certificates,
        rp_entity_id: string_field(object, "rpEntityId"),
        callback_url: string_field(object, "callbackURL"),
        enable_request_signing,
    })
}

/// Reads a string field that validation has already type-checked.
fn string_field(object: ConfigObject<'_>, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Validates `options` and builds the wire request.
///
/// Returns `Ok(None)` when the input is not a SAML request at all: not an
/// object, or a create request without a provider ID.
///
/// # Errors
///
/// Returns [`AuthConfigError`] when validation fails.
pub fn build_server_request(
    options: &Value,
    mode: RequestMode,
) -> Result<Option<SamlConfigRequest>, AuthConfigError> {
    let applicable = validator::is_object(options)
        && (mode.is_update() || validator::is_truthy(options.get("providerId")));
    if !applicable {
        return Ok(None);
    }
    let request = SamlConfigRequest::from(&validate(options, mode)?);
    debug!(
        config = "saml",
        mode = mode.as_str(),
        has_idp_config = request.idp_config.is_some(),
        has_sp_config = request.sp_config.is_some(),
        "built SAML provider request"
    );
    Ok(Some(request))
}

/// Parses a SAML provider from a server response.
///
/// # Errors
///
/// Returns an internal [`AuthConfigError`] when the resource name, IdP entity
/// ID, SSO URL, or relying-party entity ID is missing.
pub fn parse_server_response(response: &Value) -> Result<SamlConfig, AuthConfigError> {
    let decoded: SamlConfigResponse = decode_response(response, RESPONSE_LABEL)?;
    let provider_id = decoded
        .name
        .as_deref()
        .and_then(provider_id_from_resource_name)
        .ok_or_else(|| contract_violation(RESPONSE_LABEL, "missing or malformed name"))?;
    let idp = decoded
        .idp_config
        .ok_or_else(|| contract_violation(RESPONSE_LABEL, "missing idpConfig"))?;
    let sp =
        decoded.sp_config.ok_or_else(|| contract_violation(RESPONSE_LABEL, "missing spConfig"))?;
    let idp_entity_id = non_empty(idp.idp_entity_id)
        .ok_or_else(|| contract_violation(RESPONSE_LABEL, "missing idpConfig.idpEntityId"))?;
    let sso_url = non_empty(idp.sso_url)
        .ok_or_else(|| contract_violation(RESPONSE_LABEL, "missing idpConfig.ssoUrl"))?;
    let rp_entity_id = non_empty(sp.sp_entity_id)
        .ok_or_else(|| contract_violation(RESPONSE_LABEL, "missing spConfig.spEntityId"))?;
    let x509_certificates = idp
        .idp_certificates
        .unwrap_or_default()
        .into_iter()
        .map(|cert| cert.x509_certificate)
        .filter(|cert| !cert.is_empty())
        .collect();
    Ok(SamlConfig {
        enabled: decoded.enabled.unwrap_or(false),
        display_name: decoded.display_name,
        provider_id,
        idp_entity_id,
        sso_url,
        x509_certificates,
        rp_entity_id,
        callback_url: sp.callback_uri,
        enable_request_signing: idp.sign_request.unwrap_or(false),
    })
}

/// Drops empty strings.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

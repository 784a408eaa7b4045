// crates/firebase-auth-config/src/provider.rs
// ============================================================================
// Module: Auth Provider Dispatch
// Description: Provider-ID routing and list-request validation.
// Purpose: Pick the SAML or OIDC translator from a provider ID prefix.
// Dependencies: serde, serde_json, tracing
// ============================================================================

//! ## Overview
//! Callers hand over a provider config without saying which protocol it
//! uses; the `saml.` or `oidc.` prefix of the provider ID decides. The same
//! prefix picks the backend collection a request is addressed to.
//!
//! Listing providers takes a filter naming the protocol plus optional paging.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::AuthConfigError;
use crate::error::AuthErrorCode;
use crate::object::ConfigObject;
use crate::oidc;
use crate::oidc::OidcConfig;
use crate::oidc::OidcConfigRequest;
use crate::saml;
use crate::saml::SamlConfig;
use crate::saml::SamlConfigRequest;
use crate::translate::RequestMode;
use crate::update_mask::update_mask_for;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Largest page size accepted by a provider list request.
pub const MAX_LIST_PROVIDER_CONFIGS_PAGE_SIZE: u32 = 100;

/// Accepted list filter keys.
const LIST_FILTER_KEYS: &[&str] = &["type", "maxResults", "pageToken"];

// ============================================================================
// SECTION: Types
// ============================================================================

/// Identity-provider protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthProviderKind {
    /// SAML 2.0 provider (`saml.` prefix).
    Saml,
    /// OpenID Connect provider (`oidc.` prefix).
    Oidc,
}

impl AuthProviderKind {
    /// Resolves the protocol from a provider ID prefix.
    #[must_use]
    pub fn from_provider_id(provider_id: &str) -> Option<Self> {
        if saml::is_provider_id_str(provider_id) {
            Some(Self::Saml)
        } else if oidc::is_provider_id_str(provider_id) {
            Some(Self::Oidc)
        } else {
            None
        }
    }

    /// Resolves the protocol from a list filter `type` label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "saml" => Some(Self::Saml),
            "oidc" => Some(Self::Oidc),
            _ => None,
        }
    }

    /// Returns the list filter label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Saml => "saml",
            Self::Oidc => "oidc",
        }
    }

    /// Returns the backend collection name for this protocol.
    #[must_use]
    pub const fn collection(self) -> &'static str {
        match self {
            Self::Saml => "inboundSamlConfigs",
            Self::Oidc => "oauthIdpConfigs",
        }
    }
}

/// Protocol-specific provider request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AuthProviderRequest {
    /// SAML request.
    Saml(SamlConfigRequest),
    /// OIDC request.
    Oidc(OidcConfigRequest),
}

impl AuthProviderRequest {
    /// Returns the protocol of this request.
    #[must_use]
    pub const fn kind(&self) -> AuthProviderKind {
        match self {
            Self::Saml(_) => AuthProviderKind::Saml,
            Self::Oidc(_) => AuthProviderKind::Oidc,
        }
    }

    /// Returns the update mask for sending this body as a PATCH.
    #[must_use]
    pub fn update_mask(&self) -> Vec<String> {
        update_mask_for(self, &[])
    }
}

/// Provider config parsed from a server response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthProviderConfig {
    /// SAML provider.
    Saml(SamlConfig),
    /// OIDC provider.
    Oidc(OidcConfig),
}

impl AuthProviderConfig {
    /// Returns the provider ID.
    #[must_use]
    pub fn provider_id(&self) -> &str {
        match self {
            Self::Saml(config) => &config.provider_id,
            Self::Oidc(config) => &config.provider_id,
        }
    }

    /// Returns the public JSON representation.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Saml(config) => config.to_json(),
            Self::Oidc(config) => config.to_json(),
        }
    }
}

/// Validated provider list request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProviderConfigsRequest {
    /// Protocol to list; selects the collection rather than a query field.
    #[serde(skip)]
    pub kind: AuthProviderKind,
    /// Page size in `[1, MAX_LIST_PROVIDER_CONFIGS_PAGE_SIZE]`.
    pub page_size: u32,
    /// Continuation token from a previous page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

// ============================================================================
// SECTION: Operations
// ============================================================================

/// Validates a provider config for creation and builds its request.
///
/// # Errors
///
/// Returns [`AuthConfigError`] with `InvalidConfig` when the input is not an
/// object, `InvalidProviderId` when the provider ID has no known prefix, or
/// the protocol translator's validation error.
pub fn build_create_request(options: &Value) -> Result<AuthProviderRequest, AuthConfigError> {
    if !options.is_object() {
        return Err(AuthConfigError::invalid_config(
            "Request is missing \"AuthProviderConfig\" configuration.",
        ));
    }
    let kind = options
        .get("providerId")
        .and_then(Value::as_str)
        .and_then(AuthProviderKind::from_provider_id)
        .ok_or_else(|| AuthConfigError::from_code(AuthErrorCode::InvalidProviderId))?;
    build_request(kind, options, RequestMode::Create)
}

/// Validates a provider patch and builds its request.
///
/// # Errors
///
/// Returns [`AuthConfigError`] with `InvalidConfig` when the input is not an
/// object, `InvalidProviderId` when `provider_id` has no known prefix, or the
/// protocol translator's validation error.
pub fn build_update_request(
    provider_id: &str,
    options: &Value,
) -> Result<AuthProviderRequest, AuthConfigError> {
    if !options.is_object() {
        return Err(AuthConfigError::invalid_config(
            "Request is missing \"UpdateAuthProviderRequest\" configuration.",
        ));
    }
    let kind = AuthProviderKind::from_provider_id(provider_id)
        .ok_or_else(|| AuthConfigError::from_code(AuthErrorCode::InvalidProviderId))?;
    build_request(kind, options, RequestMode::Update)
}

/// Routes to the protocol translator.
fn build_request(
    kind: AuthProviderKind,
    options: &Value,
    mode: RequestMode,
) -> Result<AuthProviderRequest, AuthConfigError> {
    let request = match kind {
        AuthProviderKind::Saml => {
            saml::build_server_request(options, mode)?.map(AuthProviderRequest::Saml)
        }
        AuthProviderKind::Oidc => {
            oidc::build_server_request(options, mode)?.map(AuthProviderRequest::Oidc)
        }
    };
    request.ok_or_else(|| AuthConfigError::from_code(AuthErrorCode::InvalidProviderId))
}

/// Parses a provider response of the given protocol.
///
/// # Errors
///
/// Returns an internal [`AuthConfigError`] when the response is incomplete.
pub fn parse_server_response(
    kind: AuthProviderKind,
    response: &Value,
) -> Result<AuthProviderConfig, AuthConfigError> {
    match kind {
        AuthProviderKind::Saml => saml::parse_server_response(response).map(AuthProviderConfig::Saml),
        AuthProviderKind::Oidc => oidc::parse_server_response(response).map(AuthProviderConfig::Oidc),
    }
}

/// Validates a provider list filter.
///
/// `maxResults` defaults to [`MAX_LIST_PROVIDER_CONFIGS_PAGE_SIZE`].
///
/// # Errors
///
/// Returns [`AuthConfigError`] with `InvalidArgument` for a bad shape, key,
/// type, or page size, and `InvalidPageToken` for a bad page token.
pub fn build_list_request(filter: &Value) -> Result<ListProviderConfigsRequest, AuthConfigError> {
    let object = ConfigObject::parse(filter, || {
        AuthConfigError::invalid_argument("\"AuthProviderConfigFilter\" must be a valid object.")
    })?;
    object.reject_unknown_keys(LIST_FILTER_KEYS, |key| {
        AuthConfigError::invalid_argument(format!(
            "\"{key}\" is not a valid AuthProviderConfigFilter parameter."
        ))
    })?;
    let kind = object
        .get("type")
        .and_then(Value::as_str)
        .and_then(AuthProviderKind::from_label)
        .ok_or_else(|| {
            AuthConfigError::invalid_argument(
                "\"AuthProviderConfigFilter.type\" must be either \"saml\" or \"oidc\".",
            )
        })?;
    let page_size = match object.get("maxResults") {
        None => MAX_LIST_PROVIDER_CONFIGS_PAGE_SIZE,
        Some(value) => value
            .as_u64()
            .and_then(|raw| u32::try_from(raw).ok())
            .filter(|size| (1..=MAX_LIST_PROVIDER_CONFIGS_PAGE_SIZE).contains(size))
            .ok_or_else(|| {
                AuthConfigError::invalid_argument(format!(
                    "Required \"maxResults\" must be a positive integer that does not exceed \
                     {MAX_LIST_PROVIDER_CONFIGS_PAGE_SIZE}."
                ))
            })?,
    };
    let page_token = object.optional_non_empty_string("pageToken", || {
        AuthConfigError::from_code(AuthErrorCode::InvalidPageToken)
    })?;
    debug!(
        config = "provider_list",
        kind = kind.as_str(),
        page_size,
        has_page_token = page_token.is_some(),
        "built provider list request"
    );
    Ok(ListProviderConfigsRequest {
        kind,
        page_size,
        page_token,
    })
}

#[cfg(test)]
mod tests;

// crates/firebase-auth-config/src/multi_factor.rs
// ============================================================================
// Module: Multi-Factor Config
// Description: Multi-factor policy validation and wire translation.
// Purpose: Map second-factor types and TOTP provider settings to the backend.
// Dependencies: serde, serde_json, tracing
// ============================================================================

//! ## Overview
//! Public factor identifiers (`phone`) map to server enum values
//! (`PHONE_SMS`) through two immutable lookup tables. Requests reject unknown
//! factor identifiers; responses silently drop server factor types and
//! provider configs this client does not know yet.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::AuthConfigError;
use crate::object::ConfigObject;
use crate::translate::contract_violation;
use crate::translate::decode_response;
use crate::translate::display_value;
use crate::translate::parse_label;
use crate::translate::to_json_value;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Smallest accepted TOTP adjacent interval count.
pub const MIN_TOTP_ADJACENT_INTERVALS: u32 = 0;
/// Largest accepted TOTP adjacent interval count.
pub const MAX_TOTP_ADJACENT_INTERVALS: u32 = 10;

/// Accepted top-level keys.
const MULTI_FACTOR_KEYS: &[&str] = &["state", "factorIds", "providerConfigs"];
/// Accepted provider config keys.
const PROVIDER_CONFIG_KEYS: &[&str] = &["state", "totpProviderConfig"];
/// Accepted TOTP provider config keys.
const TOTP_PROVIDER_CONFIG_KEYS: &[&str] = &["adjacentIntervals"];
/// Label used in response contract errors.
const RESPONSE_LABEL: &str = "multi-factor configuration response";

/// Client factor identifier to server enum value.
static AUTH_FACTOR_CLIENT_TO_SERVER: LazyLock<BTreeMap<&'static str, &'static str>> =
    LazyLock::new(|| BTreeMap::from([("phone", "PHONE_SMS")]));

/// Server enum value to client factor identifier.
static AUTH_FACTOR_SERVER_TO_CLIENT: LazyLock<BTreeMap<&'static str, &'static str>> =
    LazyLock::new(|| {
        AUTH_FACTOR_CLIENT_TO_SERVER.iter().map(|(client, server)| (*server, *client)).collect()
    });

// ============================================================================
// SECTION: Types
// ============================================================================

/// Enablement state for multi-factor auth and its providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MultiFactorState {
    /// Enabled.
    Enabled,
    /// Disabled.
    Disabled,
}

/// Second-factor type recognized by this client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthFactorType {
    /// SMS-based phone factor.
    Phone,
}

impl AuthFactorType {
    /// Returns the public identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Phone => "phone",
        }
    }

    /// Resolves a public identifier.
    #[must_use]
    pub fn from_client(id: &str) -> Option<Self> {
        match id {
            "phone" => Some(Self::Phone),
            _ => None,
        }
    }

    /// Returns the server enum value for this factor.
    #[must_use]
    pub fn server_type(self) -> Option<&'static str> {
        AUTH_FACTOR_CLIENT_TO_SERVER.get(self.as_str()).copied()
    }

    /// Resolves a server enum value; unknown values yield `None`.
    #[must_use]
    pub fn from_server(server_type: &str) -> Option<Self> {
        AUTH_FACTOR_SERVER_TO_CLIENT.get(server_type).and_then(|client| Self::from_client(client))
    }
}

/// TOTP second-factor settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotpProviderConfig {
    /// Number of adjacent time windows accepted, in `[0, 10]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjacent_intervals: Option<u32>,
}

/// Per-provider multi-factor settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiFactorProviderConfig {
    /// Provider state.
    pub state: MultiFactorState,
    /// TOTP settings; the only provider type currently defined.
    pub totp_provider_config: TotpProviderConfig,
}

/// Validated public multi-factor config.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiFactorConfig {
    /// Overall state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<MultiFactorState>,
    /// Enabled second factors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factor_ids: Option<Vec<AuthFactorType>>,
    /// Provider-specific settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_configs: Option<Vec<MultiFactorProviderConfig>>,
}

/// Multi-factor config as exchanged with the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiFactorServerConfig {
    /// Overall state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<MultiFactorState>,
    /// Server factor enum values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled_providers: Option<Vec<String>>,
    /// Provider-specific settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_configs: Option<Vec<MultiFactorProviderConfig>>,
}

/// Multi-factor response as received from the backend.
///
/// Provider configs stay raw so entries of unknown type or state can be
/// dropped individually.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MultiFactorServerResponse {
    /// Overall state.
    #[serde(default)]
    state: Option<MultiFactorState>,
    /// Server factor enum values.
    #[serde(default)]
    enabled_providers: Option<Vec<String>>,
    /// Raw provider-specific settings.
    #[serde(default)]
    provider_configs: Option<Vec<Value>>,
}

impl From<&MultiFactorConfig> for MultiFactorServerConfig {
    fn from(config: &MultiFactorConfig) -> Self {
        Self {
            state: config.state,
            enabled_providers: config.factor_ids.as_ref().map(|ids| {
                ids.iter().filter_map(|id| id.server_type()).map(str::to_string).collect()
            }),
            provider_configs: config.provider_configs.clone(),
        }
    }
}

/// Multi-factor config parsed from a server response.
///
/// # Invariants
/// - `factor_ids` only holds factor types this client recognizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiFactorAuthConfig {
    /// Overall state.
    pub state: MultiFactorState,
    /// Enabled second factors.
    pub factor_ids: Vec<AuthFactorType>,
    /// Provider-specific settings.
    pub provider_configs: Vec<MultiFactorProviderConfig>,
}

impl MultiFactorAuthConfig {
    /// Returns the public JSON representation.
    #[must_use]
    pub fn to_json(&self) -> Value {
        to_json_value(self)
    }
}

// ============================================================================
// SECTION: Operations
// ============================================================================

/// Validates a public multi-factor config.
///
/// # Errors
///
/// Returns [`AuthConfigError`] with `InvalidConfig` for shape, key, state, or
/// factor faults, and `InvalidArgument` for out-of-range TOTP intervals.
pub fn validate(options: &Value) -> Result<MultiFactorConfig, AuthConfigError> {
    let object = ConfigObject::parse(options, || {
        AuthConfigError::invalid_config("\"MultiFactorConfig\" must be a non-null object.")
    })?;
    object.reject_unknown_keys(MULTI_FACTOR_KEYS, |key| {
        AuthConfigError::invalid_config(format!(
            "\"{key}\" is not a valid MultiFactorConfig parameter."
        ))
    })?;

    let state = match object.get("state") {
        None => None,
        Some(value) => Some(parse_label::<MultiFactorState>(value).ok_or_else(|| {
            AuthConfigError::invalid_config(
                "\"MultiFactorConfig.state\" must be either \"ENABLED\" or \"DISABLED\".",
            )
        })?),
    };

    let factor_ids = match object.get("factorIds") {
        None => None,
        Some(Value::Array(items)) => Some(
            items
                .iter()
                .map(|item| {
                    item.as_str().and_then(AuthFactorType::from_client).ok_or_else(|| {
                        AuthConfigError::invalid_config(format!(
                            "\"{}\" is not a valid \"AuthFactorType\".",
                            display_value(item)
                        ))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Some(_) => {
            return Err(AuthConfigError::invalid_config(
                "\"MultiFactorConfig.factorIds\" must be an array of valid \"AuthFactorTypes\".",
            ));
        }
    };

    let provider_configs = match object.get("providerConfigs") {
        None => None,
        Some(Value::Array(items)) => {
            Some(items.iter().map(validate_provider_config).collect::<Result<Vec<_>, _>>()?)
        }
        Some(_) => {
            return Err(AuthConfigError::invalid_config(
                "\"MultiFactorConfig.providerConfigs\" must be an array of valid \
                 \"MultiFactorProviderConfig.\"",
            ));
        }
    };

    Ok(MultiFactorConfig {
        state,
        factor_ids,
        provider_configs,
    })
}

/// Validates a single provider config entry.
fn validate_provider_config(value: &Value) -> Result<MultiFactorProviderConfig, AuthConfigError> {
    let object = ConfigObject::parse(value, || {
        AuthConfigError::invalid_config(format!(
            "\"{}\" is not a valid \"MultiFactorProviderConfig\" type.",
            display_value(value)
        ))
    })?;
    object.reject_unknown_keys(PROVIDER_CONFIG_KEYS, |key| {
        AuthConfigError::invalid_config(format!("\"{key}\" is not a valid ProviderConfig parameter."))
    })?;
    let state = object.get("state").and_then(parse_label::<MultiFactorState>).ok_or_else(|| {
        AuthConfigError::invalid_config(
            "\"MultiFactorConfig.providerConfigs.state\" must be either \"ENABLED\" or \"DISABLED\".",
        )
    })?;
    let totp = object.get("totpProviderConfig").ok_or_else(|| {
        AuthConfigError::invalid_config(
            "\"MultiFactorConfig.providerConfigs.totpProviderConfig\" must be defined.",
        )
    })?;
    let totp = ConfigObject::parse(totp, || {
        AuthConfigError::invalid_config(
            "\"MultiFactorConfig.providerConfigs.totpProviderConfig\" must be a non-null object.",
        )
    })?;
    totp.reject_unknown_keys(TOTP_PROVIDER_CONFIG_KEYS, |key| {
        AuthConfigError::invalid_config(format!(
            "\"{key}\" is not a valid TotpProviderConfig parameter."
        ))
    })?;
    let adjacent_intervals = match totp.get("adjacentIntervals") {
        None => None,
        Some(value) => Some(
            value
                .as_u64()
                .and_then(|raw| u32::try_from(raw).ok())
                .filter(|raw| {
                    (MIN_TOTP_ADJACENT_INTERVALS..=MAX_TOTP_ADJACENT_INTERVALS).contains(raw)
                })
                .ok_or_else(|| {
                    AuthConfigError::invalid_argument(
                        "\"MultiFactorConfig.providerConfigs.totpProviderConfig.adjacentIntervals\" \
                         must be a valid number between 0 and 10 (both inclusive).",
                    )
                })?,
        ),
    };
    Ok(MultiFactorProviderConfig {
        state,
        totp_provider_config: TotpProviderConfig {
            adjacent_intervals,
        },
    })
}

/// Validates `options` and builds the wire request.
///
/// An explicit empty `factorIds` list is sent as an empty `enabledProviders`
/// list so the backend clears existing factors.
///
/// # Errors
///
/// Returns [`AuthConfigError`] when validation fails.
pub fn build_server_request(options: &Value) -> Result<MultiFactorServerConfig, AuthConfigError> {
    let config = validate(options)?;
    let request = MultiFactorServerConfig::from(&config);
    debug!(
        config = "multi_factor",
        enabled_providers = request.enabled_providers.as_ref().map_or(0, Vec::len),
        "built multi-factor request"
    );
    Ok(request)
}

/// Parses a server multi-factor response.
///
/// # Errors
///
/// Returns an internal [`AuthConfigError`] when `state` is missing. Provider
/// configs of unknown type or state are dropped.
pub fn parse_server_response(response: &Value) -> Result<MultiFactorAuthConfig, AuthConfigError> {
    let decoded: MultiFactorServerResponse = decode_response(response, RESPONSE_LABEL)?;
    let Some(state) = decoded.state else {
        return Err(contract_violation(RESPONSE_LABEL, "missing state"));
    };
    let factor_ids = decoded
        .enabled_providers
        .unwrap_or_default()
        .iter()
        .filter_map(|server_type| {
            let factor = AuthFactorType::from_server(server_type);
            if factor.is_none() {
                debug!(server_type = server_type.as_str(), "dropping unsupported factor type");
            }
            factor
        })
        .collect();
    Ok(MultiFactorAuthConfig {
        state,
        factor_ids,
        provider_configs: decoded
            .provider_configs
            .unwrap_or_default()
            .iter()
            .filter_map(parse_provider_config)
            .collect(),
    })
}

/// Reads one server provider config, or `None` when its type or state is unknown.
fn parse_provider_config(entry: &Value) -> Option<MultiFactorProviderConfig> {
    let state = entry.get("state").and_then(parse_label::<MultiFactorState>);
    let totp_provider_config =
        entry.get("totpProviderConfig").and_then(|raw| TotpProviderConfig::deserialize(raw).ok());
    match (state, totp_provider_config) {
        (Some(state), Some(totp_provider_config)) => Some(MultiFactorProviderConfig {
            state,
            totp_provider_config,
        }),
        _ => {
            debug!(entry = %display_value(entry), "dropping unsupported provider config");
            None
        }
    }
}

#[cfg(test)]
mod tests;

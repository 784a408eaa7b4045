// crates/firebase-auth-config/src/translate.rs
// ============================================================================
// Module: Translation Plumbing
// Description: Request modes and shared wire encode/decode helpers.
// Purpose: Keep every translator's create/update and response handling uniform.
// Dependencies: serde, serde_json, tracing
// ============================================================================

//! ## Overview
//! [`RequestMode`] selects create semantics (required fields enforced) or
//! update semantics (absent fields allowed). Response decoding maps any
//! structural mismatch to an internal error because it means the backend and
//! this client disagree on the wire contract.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Map;
use serde_json::Value;
use tracing::debug;
use tracing::warn;

use crate::error::AuthConfigError;

// ============================================================================
// SECTION: Request Mode
// ============================================================================

/// Whether a request creates a resource or patches an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RequestMode {
    /// Full creation; required fields must be present.
    #[default]
    Create,
    /// Partial update; only supplied fields are checked and sent.
    Update,
}

impl RequestMode {
    /// Returns true for partial updates.
    #[must_use]
    pub const fn is_update(self) -> bool {
        matches!(self, Self::Update)
    }

    /// Returns a stable label for logging.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Decodes a server response into its wire struct, failing with an internal
/// error when the shape does not match.
pub(crate) fn decode_response<T: DeserializeOwned>(
    response: &Value,
    what: &'static str,
) -> Result<T, AuthConfigError> {
    if !response.is_object() {
        return Err(contract_violation(what, "response is not an object"));
    }
    T::deserialize(response).map_err(|err| contract_violation(what, &err.to_string()))
}

/// Logs and builds the internal error for a response contract violation.
pub(crate) fn contract_violation(what: &'static str, detail: &str) -> AuthConfigError {
    warn!(response = what, detail, "server response violates wire contract");
    AuthConfigError::internal(what)
}

/// Serializes a value object into its public JSON shape.
///
/// A serialization failure is logged and yields an empty object.
pub(crate) fn to_json_value<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_else(|err| {
        warn!(error = %err, "value object failed to serialize");
        Value::Object(Map::new())
    })
}

/// Parses an enum from its string label.
pub(crate) fn parse_label<T: DeserializeOwned>(value: &Value) -> Option<T> {
    if value.is_string() { T::deserialize(value).ok() } else { None }
}

/// Deserializes an optional enum label, mapping unrecognized values to `None`.
pub(crate) fn lenient_label<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    let parsed = raw.as_ref().and_then(parse_label);
    if parsed.is_none()
        && let Some(raw) = raw.as_ref().filter(|raw| !raw.is_null())
    {
        debug!(value = %display_value(raw), "dropping unrecognized server enum value");
    }
    Ok(parsed)
}

/// Renders a JSON value for error messages: strings verbatim, others as JSON.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

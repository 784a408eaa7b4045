// crates/firebase-auth-config/src/object.rs
// ============================================================================
// Module: Config Object Access
// Description: Presence-aware view over a developer-authored JSON object.
// Purpose: Share shape, unknown-key, and typed optional-field checks.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! [`ConfigObject`] wraps a JSON object and answers the questions every
//! translator asks in the same order: is it an object, are all keys known,
//! and does each present key carry the expected type. Presence is decided by
//! key membership, so an explicit `null` is "present" and fails type checks
//! instead of being treated as unset.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Map;
use serde_json::Value;

use crate::error::AuthConfigError;
use crate::translate::RequestMode;

// ============================================================================
// SECTION: Config Object
// ============================================================================

/// Borrowed view over a JSON object under validation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ConfigObject<'a> {
    /// Underlying object fields.
    fields: &'a Map<String, Value>,
}

impl<'a> ConfigObject<'a> {
    /// Wraps `value` or fails with `shape_error` when it is not an object.
    pub(crate) fn parse(
        value: &'a Value,
        shape_error: impl FnOnce() -> AuthConfigError,
    ) -> Result<Self, AuthConfigError> {
        value.as_object().map(|fields| Self {
            fields,
        })
        .ok_or_else(shape_error)
    }

    /// Fails on the first key not listed in `allowed`.
    pub(crate) fn reject_unknown_keys(
        &self,
        allowed: &[&str],
        unknown_error: impl FnOnce(&str) -> AuthConfigError,
    ) -> Result<(), AuthConfigError> {
        match self.fields.keys().find(|key| !allowed.contains(&key.as_str())) {
            Some(key) => Err(unknown_error(key)),
            None => Ok(()),
        }
    }

    /// Returns the value stored under `key`, including explicit `null`.
    pub(crate) fn get(&self, key: &str) -> Option<&'a Value> {
        self.fields.get(key)
    }

    /// Returns true when `key` is present.
    pub(crate) fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Returns the number of keys.
    pub(crate) fn len(&self) -> usize {
        self.fields.len()
    }

    /// Iterates over all key/value pairs.
    pub(crate) fn entries(&self) -> impl Iterator<Item = (&'a String, &'a Value)> + 'a {
        self.fields.iter()
    }

    /// Returns true when a required field must be checked: always on create,
    /// and on update only when the key was supplied.
    pub(crate) fn needs_check(&self, key: &str, mode: RequestMode) -> bool {
        !(mode.is_update() && !self.contains(key))
    }

    /// Reads an optional boolean field.
    pub(crate) fn optional_bool(
        &self,
        key: &str,
        type_error: impl FnOnce() -> AuthConfigError,
    ) -> Result<Option<bool>, AuthConfigError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Bool(flag)) => Ok(Some(*flag)),
            Some(_) => Err(type_error()),
        }
    }

    /// Reads an optional string field; the empty string is accepted.
    pub(crate) fn optional_string(
        &self,
        key: &str,
        type_error: impl FnOnce() -> AuthConfigError,
    ) -> Result<Option<String>, AuthConfigError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(text)) => Ok(Some(text.clone())),
            Some(_) => Err(type_error()),
        }
    }

    /// Reads an optional string field that must not be empty when present.
    pub(crate) fn optional_non_empty_string(
        &self,
        key: &str,
        type_error: impl FnOnce() -> AuthConfigError,
    ) -> Result<Option<String>, AuthConfigError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(text)) if !text.is_empty() => Ok(Some(text.clone())),
            Some(_) => Err(type_error()),
        }
    }
}

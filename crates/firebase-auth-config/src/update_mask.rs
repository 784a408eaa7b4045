// crates/firebase-auth-config/src/update_mask.rs
// ============================================================================
// Module: Update Masks
// Description: Field-path derivation for partial update requests.
// Purpose: List every leaf path a PATCH request body touches.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! A PATCH request carries an update mask naming the fields it replaces.
//! Paths are dot-joined object keys. Objects are descended into; arrays,
//! scalars, and `null` are leaves. A path listed as terminal is emitted as
//! a single entry even when its value is an object, so map-valued fields
//! such as `testPhoneNumbers` replace wholesale. An empty object is emitted
//! under its own key so the backend clears it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::translate::to_json_value;

// ============================================================================
// SECTION: Mask Generation
// ============================================================================

/// Returns the dot-joined field paths touched by `request`.
///
/// Returns an empty list when `request` is not an object.
#[must_use]
pub fn generate_update_mask(request: &Value, terminal_paths: &[&str]) -> Vec<String> {
    let mut paths = Vec::new();
    if let Value::Object(fields) = request {
        collect_paths(fields, "", terminal_paths, &mut paths);
    }
    paths
}

/// Serializes a typed request and derives its update mask.
#[must_use]
pub fn update_mask_for<T: Serialize>(request: &T, terminal_paths: &[&str]) -> Vec<String> {
    generate_update_mask(&to_json_value(request), terminal_paths)
}

/// Appends the paths under `fields` to `paths`.
fn collect_paths(
    fields: &Map<String, Value>,
    prefix: &str,
    terminal_paths: &[&str],
    paths: &mut Vec<String>,
) {
    for (key, value) in fields {
        let path = if prefix.is_empty() { key.clone() } else { format!("{prefix}.{key}") };
        match value {
            Value::Object(nested)
                if !nested.is_empty() && !terminal_paths.contains(&path.as_str()) =>
            {
                collect_paths(nested, &path, terminal_paths, paths);
            }
            _ => paths.push(path),
        }
    }
}

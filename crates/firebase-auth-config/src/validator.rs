// crates/firebase-auth-config/src/validator.rs
// ============================================================================
// Module: Validator Primitives
// Description: Total predicates over untyped JSON configuration values.
// Purpose: Shared leaf checks used by every configuration translator.
// Dependencies: regex, serde_json, url
// ============================================================================

//! ## Overview
//! Every predicate accepts either `&Value` or `Option<&Value>` so absent keys,
//! explicit `null`, and wrong types are all handled without panicking. No
//! predicate fails; each returns a plain `bool`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use url::Url;

// ============================================================================
// SECTION: Patterns
// ============================================================================

/// Characters permitted anywhere in a URL string.
const URL_ALLOWED_PUNCTUATION: &str = ":/?#[]@!$&'()*+,;=.-_~%";

/// Hostname labels: alphanumeric start, then word characters or dashes.
static HOSTNAME_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9]+[a-zA-Z0-9_-]*(\.?[a-zA-Z0-9]+[a-zA-Z0-9_-]*)*$").ok()
});

/// Path segments made of unreserved and sub-delimiter characters.
static PATHNAME_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^(/[a-zA-Z0-9_\-.~!$'()*+,;=:@%]+)*/?$").ok()
});

// ============================================================================
// SECTION: Predicates
// ============================================================================

/// Returns true for a JSON object (never `null`, never an array).
#[must_use]
pub fn is_object<'a>(value: impl Into<Option<&'a Value>>) -> bool {
    matches!(value.into(), Some(Value::Object(_)))
}

/// Returns true for a JSON array.
#[must_use]
pub fn is_array<'a>(value: impl Into<Option<&'a Value>>) -> bool {
    matches!(value.into(), Some(Value::Array(_)))
}

/// Returns true for a JSON boolean.
#[must_use]
pub fn is_boolean<'a>(value: impl Into<Option<&'a Value>>) -> bool {
    matches!(value.into(), Some(Value::Bool(_)))
}

/// Returns true for a JSON number.
#[must_use]
pub fn is_number<'a>(value: impl Into<Option<&'a Value>>) -> bool {
    matches!(value.into(), Some(Value::Number(_)))
}

/// Returns true for a number without a fractional part.
#[must_use]
pub fn is_integer<'a>(value: impl Into<Option<&'a Value>>) -> bool {
    match value.into() {
        Some(Value::Number(number)) => {
            number.is_i64() || number.is_u64() || number.as_f64().is_some_and(|f| f.fract() == 0.0)
        }
        _ => false,
    }
}

/// Returns true for any JSON string, including the empty string.
#[must_use]
pub fn is_string<'a>(value: impl Into<Option<&'a Value>>) -> bool {
    matches!(value.into(), Some(Value::String(_)))
}

/// Returns true for a string with at least one character.
#[must_use]
pub fn is_non_empty_string<'a>(value: impl Into<Option<&'a Value>>) -> bool {
    matches!(value.into(), Some(Value::String(text)) if !text.is_empty())
}

/// Returns true when the value would be truthy as a loosely typed flag:
/// non-empty strings, non-zero numbers, `true`, objects, and arrays.
#[must_use]
pub fn is_truthy<'a>(value: impl Into<Option<&'a Value>>) -> bool {
    match value.into() {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(number)) => number.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

/// Returns true for an absolute `http`/`https` URL with a well-formed host
/// and path.
#[must_use]
pub fn is_url<'a>(value: impl Into<Option<&'a Value>>) -> bool {
    match value.into() {
        Some(Value::String(text)) => is_url_str(text),
        _ => false,
    }
}

/// String form of [`is_url`].
#[must_use]
pub fn is_url_str(text: &str) -> bool {
    if !text.chars().all(|c| c.is_ascii_alphanumeric() || URL_ALLOWED_PUNCTUATION.contains(c)) {
        return false;
    }
    let lowered = text.to_ascii_lowercase();
    if !(lowered.starts_with("http://") || lowered.starts_with("https://")) {
        return false;
    }
    let Ok(parsed) = Url::parse(text) else {
        return false;
    };
    let Some(host) = parsed.host_str() else {
        return false;
    };
    if !HOSTNAME_PATTERN.as_ref().is_some_and(|pattern| pattern.is_match(host)) {
        return false;
    }
    let path = parsed.path();
    path.is_empty()
        || path == "/"
        || PATHNAME_PATTERN.as_ref().is_some_and(|pattern| pattern.is_match(path))
}

/// Returns true for a loosely E.164-shaped phone number: a leading `+` and at
/// least one alphanumeric character. The backend normalizes the rest.
#[must_use]
pub fn is_phone_number<'a>(value: impl Into<Option<&'a Value>>) -> bool {
    match value.into() {
        Some(Value::String(text)) => is_phone_number_str(text),
        _ => false,
    }
}

/// String form of [`is_phone_number`].
#[must_use]
pub fn is_phone_number_str(text: &str) -> bool {
    text.starts_with('+') && text.chars().any(|c| c.is_ascii_alphanumeric())
}

// crates/firebase-auth-config/src/phone.rs
// ============================================================================
// Module: Test Phone Numbers
// Description: Validation for fictional phone number / code pairs.
// Purpose: Enforce the pair limit, E.164 shape, and six-digit codes.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! Test phone numbers let developers sign in with fixed codes without sending
//! SMS. The map is capped at [`MAXIMUM_TEST_PHONE_NUMBERS`] entries.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::AuthConfigError;
use crate::error::AuthErrorCode;
use crate::object::ConfigObject;
use crate::translate::display_value;
use crate::validator;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum number of test phone number / code pairs.
pub const MAXIMUM_TEST_PHONE_NUMBERS: usize = 10;
/// Required length of a test verification code.
const TEST_CODE_LENGTH: usize = 6;

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validates a map of test phone numbers to six-digit codes.
///
/// # Errors
///
/// Returns [`AuthConfigError`] with `InvalidArgument` for a non-object input,
/// `MaximumTestPhoneNumberExceeded` past the limit, and
/// `InvalidTestingPhoneNumber` for a malformed number or code.
pub fn validate_test_phone_numbers(
    test_phone_numbers: &Value,
) -> Result<BTreeMap<String, String>, AuthConfigError> {
    let object = ConfigObject::parse(test_phone_numbers, || {
        AuthConfigError::invalid_argument(
            "\"testPhoneNumbers\" must be a map of phone number / code pairs.",
        )
    })?;
    if object.len() > MAXIMUM_TEST_PHONE_NUMBERS {
        return Err(AuthConfigError::from_code(AuthErrorCode::MaximumTestPhoneNumberExceeded));
    }
    let mut pairs = BTreeMap::new();
    for (phone_number, code) in object.entries() {
        if !validator::is_phone_number_str(phone_number) {
            return Err(AuthConfigError::new(
                AuthErrorCode::InvalidTestingPhoneNumber,
                format!("\"{phone_number}\" is not a valid E.164 standard compliant phone number."),
            ));
        }
        let code = code.as_str().filter(|text| is_test_code(text)).ok_or_else(|| {
            AuthConfigError::new(
                AuthErrorCode::InvalidTestingPhoneNumber,
                format!("\"{}\" is not a valid 6 digit code string.", display_value(code)),
            )
        })?;
        pairs.insert(phone_number.clone(), code.to_string());
    }
    Ok(pairs)
}

/// Returns true for exactly six ASCII digits.
fn is_test_code(code: &str) -> bool {
    code.len() == TEST_CODE_LENGTH && code.bytes().all(|byte| byte.is_ascii_digit())
}

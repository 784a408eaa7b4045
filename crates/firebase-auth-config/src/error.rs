// crates/firebase-auth-config/src/error.rs
// ============================================================================
// Module: Auth Config Errors
// Description: Error taxonomy shared by every configuration translator.
// Purpose: Carry a stable machine-readable code plus a field-level message.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Every translator fails with [`AuthConfigError`]. The [`AuthErrorCode`]
//! distinguishes developer-input faults (recoverable by fixing the input) from
//! [`AuthErrorCode::InternalError`], which is only raised while parsing a
//! server response that breaks the wire contract.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use thiserror::Error;

// ============================================================================
// SECTION: Error Codes
// ============================================================================

/// Machine-readable error code attached to every [`AuthConfigError`].
///
/// # Invariants
/// - Labels returned by [`AuthErrorCode::label`] are stable wire identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthErrorCode {
    /// Generic invalid argument.
    InvalidArgument,
    /// Configuration object is malformed.
    InvalidConfig,
    /// Provider ID is absent.
    MissingProviderId,
    /// Provider ID is present but malformed or has the wrong prefix.
    InvalidProviderId,
    /// OIDC client ID is absent.
    MissingOauthClientId,
    /// OIDC client ID is present but malformed.
    InvalidOauthClientId,
    /// OIDC issuer is absent.
    MissingIssuer,
    /// SAML IdP or relying-party settings are absent.
    MissingSamlRelyingPartyConfig,
    /// Too many test phone numbers.
    MaximumTestPhoneNumberExceeded,
    /// Test phone number or its code is malformed.
    InvalidTestingPhoneNumber,
    /// OIDC response type flags are inconsistent.
    InvalidOauthResponseType,
    /// OIDC code flow enabled without a client secret.
    MissingOauthClientSecret,
    /// List page token is malformed.
    InvalidPageToken,
    /// Tenant identifier is malformed.
    InvalidTenantId,
    /// Server response violated the wire contract.
    InternalError,
}

impl AuthErrorCode {
    /// Returns the stable wire label for the code.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::InvalidArgument => "auth/argument-error",
            Self::InvalidConfig => "auth/invalid-config",
            Self::MissingProviderId => "auth/missing-provider-id",
            Self::InvalidProviderId => "auth/invalid-provider-id",
            Self::MissingOauthClientId => "auth/missing-oauth-client-id",
            Self::InvalidOauthClientId => "auth/invalid-oauth-client-id",
            Self::MissingIssuer => "auth/missing-issuer",
            Self::MissingSamlRelyingPartyConfig => "auth/missing-saml-relying-party-config",
            Self::MaximumTestPhoneNumberExceeded => "auth/test-phone-number-limit-exceeded",
            Self::InvalidTestingPhoneNumber => "auth/invalid-testing-phone-number",
            Self::InvalidOauthResponseType => "auth/invalid-oauth-responsetype",
            Self::MissingOauthClientSecret => "auth/missing-oauth-client-secret",
            Self::InvalidPageToken => "auth/invalid-page-token",
            Self::InvalidTenantId => "auth/invalid-tenant-id",
            Self::InternalError => "auth/internal-error",
        }
    }

    /// Returns the default message used when no field-level detail applies.
    #[must_use]
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::InvalidArgument => "Invalid argument provided.",
            Self::InvalidConfig => "The provided configuration is invalid.",
            Self::MissingProviderId => "A valid provider ID must be provided in the request.",
            Self::InvalidProviderId => {
                "The provider ID must be a valid string prefixed with \"saml.\" or \"oidc.\"."
            }
            Self::MissingOauthClientId => "The OAuth/OIDC configuration client ID must not be empty.",
            Self::InvalidOauthClientId => "The provided OAuth client ID is invalid.",
            Self::MissingIssuer => "The OAuth/OIDC configuration issuer must not be empty.",
            Self::MissingSamlRelyingPartyConfig => {
                "The SAML configuration provided is missing a relying party configuration."
            }
            Self::MaximumTestPhoneNumberExceeded => {
                "The maximum allowed number of test phone number / code pairs has been exceeded."
            }
            Self::InvalidTestingPhoneNumber => {
                "Invalid testing phone number or invalid test code provided."
            }
            Self::InvalidOauthResponseType => {
                "Only exactly one OAuth responseType should be set to true."
            }
            Self::MissingOauthClientSecret => {
                "The OAuth configuration client secret is required to enable OIDC code flow."
            }
            Self::InvalidPageToken => "The page token must be a valid non-empty string.",
            Self::InvalidTenantId => "The tenant identifier must be a valid non-empty string.",
            Self::InternalError => "An internal error has occurred.",
        }
    }
}

impl fmt::Display for AuthErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// SECTION: Error Type
// ============================================================================

/// Validation or translation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct AuthConfigError {
    /// Machine-readable code.
    code: AuthErrorCode,
    /// Human-readable detail.
    message: String,
}

impl AuthConfigError {
    /// Creates an error with an explicit message.
    #[must_use]
    pub fn new(code: AuthErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Creates an error carrying the code's default message.
    #[must_use]
    pub fn from_code(code: AuthErrorCode) -> Self {
        Self::new(code, code.default_message())
    }

    /// Shorthand for [`AuthErrorCode::InvalidConfig`].
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::new(AuthErrorCode::InvalidConfig, message)
    }

    /// Shorthand for [`AuthErrorCode::InvalidArgument`].
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(AuthErrorCode::InvalidArgument, message)
    }

    /// Builds the contract-violation error raised by response parsers.
    #[must_use]
    pub fn internal(what: &str) -> Self {
        Self::new(AuthErrorCode::InternalError, format!("INTERNAL ASSERT FAILED: Invalid {what}"))
    }

    /// Returns the error code.
    #[must_use]
    pub const fn code(&self) -> AuthErrorCode {
        self.code
    }

    /// Returns the error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns true for server contract violations, which callers must not
    /// surface as input mistakes.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self.code, AuthErrorCode::InternalError)
    }
}

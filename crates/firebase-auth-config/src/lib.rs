// crates/firebase-auth-config/src/lib.rs
// ============================================================================
// Module: Firebase Auth Config
// Description: Tenant and project auth configuration validation and translation.
// Purpose: Convert developer-facing config objects to and from the wire format.
// Dependencies: regex, serde, serde_json, thiserror, tracing, url
// ============================================================================

//! ## Overview
//! Each policy domain (multi-factor, email sign-in, SAML, OIDC, SMS regions,
//! reCAPTCHA, password policy, email privacy, mobile links) exposes three
//! module-level operations:
//! - `validate` checks an untyped public config and returns a typed value.
//! - `build_server_request` validates and returns the typed wire request.
//! - `parse_server_response` turns a wire response into a value object whose
//!   `to_json` yields the public shape.
//!
//! The [`tenant`] and [`project`] modules compose the domains into whole
//! requests, [`provider`] routes SAML/OIDC configs by provider ID, and
//! [`update_mask`] derives PATCH field paths.
//!
//! Invariants:
//! - Input faults carry a specific [`AuthErrorCode`]; only response parsing
//!   raises [`AuthErrorCode::InternalError`].
//! - Every operation is pure: inputs are borrowed and never modified.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod email_privacy;
pub mod email_sign_in;
pub mod error;
pub mod mobile_links;
pub mod multi_factor;
mod object;
pub mod oidc;
pub mod password_policy;
pub mod phone;
pub mod project;
pub mod provider;
pub mod recaptcha;
pub mod saml;
pub mod sms_region;
pub mod tenant;
mod translate;
pub mod update_mask;
pub mod validator;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use email_privacy::EmailPrivacyConfig;
pub use email_sign_in::EmailSignInConfig;
pub use email_sign_in::EmailSignInProviderConfig;
pub use email_sign_in::EmailSignInServerConfig;
pub use error::AuthConfigError;
pub use error::AuthErrorCode;
pub use mobile_links::MobileLinksConfig;
pub use mobile_links::MobileLinksDomain;
pub use multi_factor::AuthFactorType;
pub use multi_factor::MultiFactorAuthConfig;
pub use multi_factor::MultiFactorConfig;
pub use multi_factor::MultiFactorProviderConfig;
pub use multi_factor::MultiFactorServerConfig;
pub use multi_factor::MultiFactorState;
pub use multi_factor::TotpProviderConfig;
pub use oidc::OAuthResponseType;
pub use oidc::OidcConfig;
pub use oidc::OidcConfigOptions;
pub use oidc::OidcConfigRequest;
pub use password_policy::CustomStrengthOptionsConfig;
pub use password_policy::PasswordPolicyAuthConfig;
pub use password_policy::PasswordPolicyConfig;
pub use password_policy::PasswordPolicyEnforcementState;
pub use password_policy::PasswordPolicyServerConfig;
pub use project::ProjectConfig;
pub use project::ProjectConfigServerRequest;
pub use project::UpdateProjectConfigOptions;
pub use provider::AuthProviderConfig;
pub use provider::AuthProviderKind;
pub use provider::AuthProviderRequest;
pub use provider::ListProviderConfigsRequest;
pub use recaptcha::RecaptchaConfig;
pub use recaptcha::RecaptchaServerConfig;
pub use saml::SamlConfig;
pub use saml::SamlConfigOptions;
pub use saml::SamlConfigRequest;
pub use sms_region::SmsRegionConfig;
pub use tenant::Tenant;
pub use tenant::TenantOptions;
pub use tenant::TenantServerRequest;
pub use translate::RequestMode;

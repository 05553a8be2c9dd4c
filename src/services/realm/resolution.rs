//! Realm resolution shared by the inbound resolver and the outbound interceptor.
//!
//! The two call sites differ only in what happens when a token is malformed or
//! its issuer carries no realm: `Strict` fails, `Lenient` falls back to the
//! default realm. Everything else (patterns, claim extraction) is one path.

use axum::http::{HeaderMap, header};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::token::{bearer_token, decode_unverified};

/// Captures the realm id from issuers like `https://idp/auth/realms/<id>/...`.
static ISSUER_REALM_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r".*/realms/([a-z0-9-]+)/?.*").expect("Invalid regex pattern for issuer realm")
});

/// Realm resolution and lookup failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RealmError {
    #[error("Bad request: Invalid token provided")]
    InvalidTokenFormat,
    #[error("Realm can not be resolved from issuer: {issuer}")]
    RealmUnresolvable { issuer: String },
    #[error("Config for realm {realm} not found")]
    RealmConfigNotFound { realm: String },
    #[error("no service url configured for realm {realm}")]
    ServiceUrlNotConfigured { realm: String },
    #[error("service url for realm {realm} is not a valid uri: {url}")]
    InvalidServiceUrl { realm: String, url: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionMode {
    /// Reject requests whose identity is ambiguous.
    Strict,
    /// Degrade to the default realm instead of failing.
    Lenient,
}

impl ResolutionMode {
    fn fallback(self, default_realm: &str, err: RealmError) -> Result<String, RealmError> {
        match self {
            Self::Strict => Err(err),
            Self::Lenient => {
                debug!(error = %err, realm = %default_realm, "falling back to default realm");
                Ok(default_realm.to_owned())
            }
        }
    }
}

/// Resolve the realm for a request from its `Authorization` header.
///
/// Only the first header value is considered. A value that is not visible
/// ASCII is handled like any other malformed token.
pub fn resolve_realm(
    headers: &HeaderMap,
    default_realm: &str,
    mode: ResolutionMode,
) -> Result<String, RealmError> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(default_realm.to_owned());
    };

    match value.to_str() {
        Ok(raw) => resolve_realm_from_header(Some(raw), default_realm, mode),
        Err(_) => mode.fallback(default_realm, RealmError::InvalidTokenFormat),
    }
}

/// Resolve the realm from a raw `Authorization` header value.
pub fn resolve_realm_from_header(
    authorization: Option<&str>,
    default_realm: &str,
    mode: ResolutionMode,
) -> Result<String, RealmError> {
    let value = match authorization {
        None => return Ok(default_realm.to_owned()),
        Some(v) if mode == ResolutionMode::Lenient && v.trim().is_empty() => {
            return Ok(default_realm.to_owned());
        }
        Some(v) => v,
    };

    let Some(token) = bearer_token(value) else {
        return mode.fallback(default_realm, RealmError::InvalidTokenFormat);
    };

    // The signature is NOT verified. The issuer only selects which realm's
    // config applies; authenticating the caller is up to that config.
    let claims = match decode_unverified(token) {
        Ok(claims) => claims,
        Err(err) => {
            debug!(error = %err, "bearer token could not be decoded");
            return mode.fallback(default_realm, RealmError::InvalidTokenFormat);
        }
    };

    let issuer = claims.iss.unwrap_or_default();
    if let Some(realm) = realm_from_issuer(&issuer) {
        return Ok(realm.to_owned());
    }

    mode.fallback(default_realm, RealmError::RealmUnresolvable { issuer })
}

/// Extract the realm id from an issuer URL.
pub fn realm_from_issuer(issuer: &str) -> Option<&str> {
    ISSUER_REALM_PATTERN
        .captures(issuer)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

//! Bearer token extraction and unverified JWT decoding.
//!
//! Nothing in this module checks a signature. Claims returned from
//! `decode_unverified` are only good for routing decisions (picking a realm)
//! and must never be treated as proof of identity.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

/// `Bearer <header>.<payload>[.<signature>]`
///
/// The signature segment may be empty, so unsigned (`alg: none`) tokens are
/// syntactically accepted.
static BEARER_JWT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^Bearer\s(?P<token>[A-Za-z0-9\-_=]+\.[A-Za-z0-9\-_=]+\.?[A-Za-z0-9\-_.+/=]*)$",
    )
    .expect("Invalid regex pattern for bearer jwt")
});

#[derive(Debug, thiserror::Error)]
pub enum TokenDecodeError {
    #[error("token must have exactly 3 segments, found {0}")]
    Segments(usize),
    #[error("token segment is not base64url: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("token segment is not a JSON object: {0}")]
    Json(#[from] serde_json::Error),
    #[error("'iss' claim is not a string")]
    IssuerNotString,
}

/// Claims read from a token payload without any verification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnverifiedClaims {
    pub iss: Option<String>,
}

/// Returns the `token` part of a `Bearer <jwt>` header value, or `None` when
/// the value does not have bearer-JWT syntax.
pub fn bearer_token(header: &str) -> Option<&str> {
    BEARER_JWT_PATTERN
        .captures(header)
        .and_then(|caps| caps.name("token"))
        .map(|m| m.as_str())
}

/// Decode a JWT's header and payload WITHOUT verifying its signature.
///
/// Only syntax is checked: three segments, base64url JSON objects for header
/// and payload, and a string-typed `iss` when present.
pub fn decode_unverified(token: &str) -> Result<UnverifiedClaims, TokenDecodeError> {
    let segments: Vec<&str> = token.split('.').collect();
    let [header, payload, _signature] = segments.as_slice() else {
        return Err(TokenDecodeError::Segments(segments.len()));
    };

    decode_json_object(header)?;
    let mut claims = decode_json_object(payload)?;

    let iss = match claims.remove("iss") {
        None | Some(Value::Null) => None,
        Some(Value::String(iss)) => Some(iss),
        Some(_) => return Err(TokenDecodeError::IssuerNotString),
    };

    Ok(UnverifiedClaims { iss })
}

fn decode_json_object(segment: &str) -> Result<Map<String, Value>, TokenDecodeError> {
    // Some issuers still pad their segments; base64url in JWTs is unpadded.
    let bytes = URL_SAFE_NO_PAD.decode(segment.trim_end_matches('='))?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::realm::testing::unsigned_token;
    use serde_json::json;

    #[test]
    fn bearer_token_accepts_signed_and_unsigned_tokens() {
        assert_eq!(bearer_token("Bearer aaa.bbb.ccc"), Some("aaa.bbb.ccc"));
        assert_eq!(bearer_token("Bearer aaa.bbb."), Some("aaa.bbb."));
        assert_eq!(bearer_token("Bearer aaa.bbb"), Some("aaa.bbb"));
    }

    #[test]
    fn bearer_token_rejects_other_shapes() {
        assert_eq!(bearer_token("Bearer not-a-jwt"), None);
        assert_eq!(bearer_token("Basic dXNlcjpwYXNz"), None);
        assert_eq!(bearer_token("bearer aaa.bbb.ccc"), None);
        assert_eq!(bearer_token("Bearer  aaa.bbb.ccc"), None);
        assert_eq!(bearer_token("Bearer aaa.bbb.ccc trailing"), None);
        assert_eq!(bearer_token(""), None);
    }

    #[test]
    fn decodes_issuer_from_unsigned_token() {
        let token = unsigned_token(json!({"iss": "https://idp/realms/acme"}));

        let claims = decode_unverified(&token).unwrap();

        assert_eq!(claims.iss.as_deref(), Some("https://idp/realms/acme"));
    }

    #[test]
    fn missing_or_null_issuer_is_none() {
        let token = unsigned_token(json!({"sub": "someone"}));
        assert_eq!(decode_unverified(&token).unwrap().iss, None);

        let token = unsigned_token(json!({"iss": null}));
        assert_eq!(decode_unverified(&token).unwrap().iss, None);
    }

    #[test]
    fn tolerates_padded_segments() {
        let token = unsigned_token(json!({"iss": "https://idp/realms/a"}));
        let mut parts = token.split('.');
        let header = parts.next().unwrap();
        let payload = parts.next().unwrap();
        let padded = format!("{header}==.{payload}=.");

        let claims = decode_unverified(&padded).unwrap();

        assert_eq!(claims.iss.as_deref(), Some("https://idp/realms/a"));
    }

    #[test]
    fn rejects_two_segment_tokens() {
        let token = unsigned_token(json!({"iss": "x"}));
        let two = token.trim_end_matches('.');

        assert!(matches!(
            decode_unverified(two),
            Err(TokenDecodeError::Segments(2))
        ));
    }

    #[test]
    fn rejects_payloads_that_are_not_json_objects() {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none"}"#);

        let not_json = format!("{header}.{}.", URL_SAFE_NO_PAD.encode(b"hello"));
        assert!(matches!(
            decode_unverified(&not_json),
            Err(TokenDecodeError::Json(_))
        ));

        let array = format!("{header}.{}.", URL_SAFE_NO_PAD.encode(br#"["iss"]"#));
        assert!(matches!(
            decode_unverified(&array),
            Err(TokenDecodeError::Json(_))
        ));

        assert!(matches!(
            decode_unverified("a!b.c.d"),
            Err(TokenDecodeError::Base64(_))
        ));
    }

    #[test]
    fn rejects_non_string_issuer() {
        let token = unsigned_token(json!({"iss": 42}));

        assert!(matches!(
            decode_unverified(&token),
            Err(TokenDecodeError::IssuerNotString)
        ));
    }
}

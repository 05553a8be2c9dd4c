use std::sync::Arc;

use axum::http::{HeaderMap, Request};

use crate::error::AppError;

use super::resolution::{RealmError, ResolutionMode, resolve_realm};
use super::store::{AuthConfig, RealmConfigStore};

/// A realm name together with the config it resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRealm<'a> {
    pub realm: String,
    pub config: &'a AuthConfig,
}

/// Picks the `AuthConfig` governing an inbound request from the issuer of its
/// bearer token.
///
/// Strict: a malformed token, an issuer without a realm, or an unknown realm
/// all reject the request with 401 and a `Bearer` challenge.
#[derive(Debug, Clone)]
pub struct IssuerBasedConfigResolver {
    store: Arc<RealmConfigStore>,
}

impl IssuerBasedConfigResolver {
    pub fn new(store: Arc<RealmConfigStore>) -> Self {
        Self { store }
    }

    pub fn resolve<B>(&self, request: &Request<B>) -> Result<&AuthConfig, AppError> {
        self.resolve_realm(request.headers()).map(|r| r.config)
    }

    pub fn resolve_realm(&self, headers: &HeaderMap) -> Result<ResolvedRealm<'_>, AppError> {
        let realm = resolve_realm(headers, self.store.default_realm(), ResolutionMode::Strict)
            .map_err(|reason| AppError::unauthorized(reason, &self.store))?;

        match self.store.get(&realm) {
            Some(config) => Ok(ResolvedRealm { realm, config }),
            None => Err(AppError::unauthorized(
                RealmError::RealmConfigNotFound { realm },
                &self.store,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::realm::testing::{bearer, scenario_store, unsigned_token};
    use axum::http::{StatusCode, header};
    use serde_json::json;

    fn resolver() -> IssuerBasedConfigResolver {
        IssuerBasedConfigResolver::new(Arc::new(scenario_store()))
    }

    fn request(authorization: Option<&str>) -> Request<()> {
        let mut builder = Request::builder().uri("/api/v1/realm");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(()).unwrap()
    }

    #[test]
    fn no_header_resolves_default_realm_config() {
        let resolver = resolver();

        let config = resolver.resolve(&request(None)).unwrap();

        assert_eq!(config.service_url, "http://pub");
    }

    #[test]
    fn issuer_realm_selects_its_config() {
        let resolver = resolver();
        let authorization = bearer(&unsigned_token(
            json!({"iss": "https://idp.example.com/realms/acme"}),
        ));

        let resolved = resolver
            .resolve_realm(request(Some(&authorization)).headers())
            .unwrap();

        assert_eq!(resolved.realm, "acme");
        assert_eq!(resolved.config.service_url, "http://acme");
    }

    #[test]
    fn malformed_token_is_unauthorized_with_challenge() {
        let resolver = resolver();

        let err = resolver
            .resolve(&request(Some("Bearer not-a-jwt")))
            .unwrap_err();

        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.reason(), &RealmError::InvalidTokenFormat);
        assert_eq!(
            err.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            r#"Bearer realm="public,acme""#
        );
    }

    #[test]
    fn issuer_without_realm_is_unauthorized() {
        let resolver = resolver();
        let authorization = bearer(&unsigned_token(json!({"iss": "https://idp.example.com/"})));

        let err = resolver.resolve(&request(Some(&authorization))).unwrap_err();

        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert!(matches!(
            err.reason(),
            RealmError::RealmUnresolvable { issuer } if issuer == "https://idp.example.com/"
        ));
    }

    #[test]
    fn unknown_realm_is_config_not_found() {
        let resolver = resolver();
        let authorization = bearer(&unsigned_token(
            json!({"iss": "https://idp.example.com/realms/ghost"}),
        ));

        let err = resolver.resolve(&request(Some(&authorization))).unwrap_err();

        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            err.reason(),
            &RealmError::RealmConfigNotFound {
                realm: "ghost".into()
            }
        );
        assert!(err.headers().contains_key(header::WWW_AUTHENTICATE));
    }

    #[test]
    fn missing_default_realm_surfaces_at_resolution_time() {
        let store = RealmConfigStore::new("ghost", [("acme", AuthConfig::new("http://acme"))]);
        let resolver = IssuerBasedConfigResolver::new(Arc::new(store));

        let err = resolver.resolve(&request(None)).unwrap_err();

        assert_eq!(
            err.reason(),
            &RealmError::RealmConfigNotFound {
                realm: "ghost".into()
            }
        );
        assert_eq!(
            err.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            r#"Bearer realm="acme""#
        );
    }

    #[test]
    fn authorization_header_name_is_case_insensitive() {
        let resolver = resolver();
        let authorization = bearer(&unsigned_token(json!({"iss": "https://idp/realms/acme"})));
        let request = Request::builder()
            .header("authorization", authorization)
            .body(())
            .unwrap();

        assert_eq!(
            resolver.resolve(&request).unwrap().service_url,
            "http://acme"
        );
    }
}

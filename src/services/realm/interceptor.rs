use std::sync::Arc;

use axum::http::{HeaderMap, Uri, request::Builder};

use crate::error::AppError;

use super::resolution::{RealmError, ResolutionMode, resolve_realm};
use super::store::RealmConfigStore;

/// Points an outgoing request at the service URL of the caller's realm.
///
/// Lenient: anything that prevents resolving a realm from the token routes the
/// request to the default realm instead of dropping it. Only a realm without
/// configuration is an error, and that one is ours (500), not the caller's.
#[derive(Debug, Clone)]
pub struct RequestInterceptor {
    store: Arc<RealmConfigStore>,
}

impl RequestInterceptor {
    pub fn new(store: Arc<RealmConfigStore>) -> Self {
        Self { store }
    }

    /// Rewrite the builder's target URI. Method, headers and extensions are
    /// left as they are.
    pub fn apply(&self, builder: Builder) -> Result<Builder, AppError> {
        let empty = HeaderMap::new();
        let headers = builder.headers_ref().unwrap_or(&empty);

        let realm = resolve_realm(headers, self.store.default_realm(), ResolutionMode::Lenient)
            .map_err(AppError::Internal)?;

        let config = self
            .store
            .get(&realm)
            .ok_or_else(|| AppError::Internal(RealmError::ServiceUrlNotConfigured {
                realm: realm.clone(),
            }))?;

        let uri: Uri = config.service_url.parse().map_err(|_| {
            AppError::Internal(RealmError::InvalidServiceUrl {
                realm: realm.clone(),
                url: config.service_url.clone(),
            })
        })?;

        Ok(builder.uri(uri))
    }
}

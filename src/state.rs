/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 *   - realm config store, inbound resolver, outbound interceptor
 * - Cheap to clone (everything inside is Arc-backed)
 */
use std::sync::Arc;

use crate::services::realm::{IssuerBasedConfigResolver, RealmConfigStore, RequestInterceptor};

#[derive(Clone, Debug)]
pub struct AppState {
    pub realms: Arc<RealmConfigStore>,
    pub resolver: IssuerBasedConfigResolver,
    pub interceptor: RequestInterceptor,
}

impl AppState {
    pub fn new(realms: Arc<RealmConfigStore>) -> Self {
        Self {
            resolver: IssuerBasedConfigResolver::new(realms.clone()),
            interceptor: RequestInterceptor::new(realms.clone()),
            realms,
        }
    }
}

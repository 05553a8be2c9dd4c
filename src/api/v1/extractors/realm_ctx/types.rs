/*
 * Responsibility
 * - The realm context handlers see for a request
 * - The middleware resolves it and stores it in request extensions; handlers only take this type
 *
 * Notes
 * - The realm comes from an unverified token issuer: it selects configuration,
 *   it does not authenticate the caller
 */
use crate::services::realm::AuthConfig;

#[derive(Debug, Clone)]
pub struct RealmCtx {
    pub realm: String,
    pub config: AuthConfig,
}

impl RealmCtx {
    pub fn new(realm: String, config: AuthConfig) -> Self {
        Self { realm, config }
    }
}

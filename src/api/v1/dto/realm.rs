/*
 * Responsibility
 * - Response DTOs for the realm endpoints
 */
use serde::Serialize;

use crate::api::v1::extractors::RealmCtx;

#[derive(Debug, Serialize)]
pub struct RealmResponse {
    pub realm: String,
    pub service_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

impl From<RealmCtx> for RealmResponse {
    fn from(ctx: RealmCtx) -> Self {
        Self {
            realm: ctx.realm,
            service_url: ctx.config.service_url,
            audience: ctx.config.audience,
            client_id: ctx.config.client_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RealmListResponse {
    pub default_realm: String,
    pub realms: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct UpstreamResponse {
    pub method: String,
    pub realm_uri: String,
}

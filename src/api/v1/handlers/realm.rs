/*
 * Responsibility
 * - GET /realm: the realm (and its config) the inbound resolver picked for this request
 * - GET /realms: configured realm names and the default realm
 */
use axum::{Json, extract::State};

use crate::api::v1::dto::realm::{RealmListResponse, RealmResponse};
use crate::api::v1::extractors::RealmCtxExtractor;
use crate::state::AppState;

pub async fn current_realm(RealmCtxExtractor(ctx): RealmCtxExtractor) -> Json<RealmResponse> {
    Json(ctx.into())
}

pub async fn list_realms(State(state): State<AppState>) -> Json<RealmListResponse> {
    Json(RealmListResponse {
        default_realm: state.realms.default_realm().to_string(),
        realms: state.realms.realm_names().map(str::to_string).collect(),
    })
}

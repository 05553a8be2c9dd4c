/*
 * Responsibility
 * - URL structure of v1
 * - /health and /realms are open, /realm sits behind inbound realm resolution
 * - /upstream runs the outbound interceptor (lenient, never rejected for a bad token)
 */
use axum::{
    Router,
    routing::{any, get},
};

use crate::middleware;
use crate::state::AppState;

use crate::api::v1::handlers::{
    health::health,
    realm::{current_realm, list_realms},
    upstream::preview_upstream,
};

pub fn routes(state: AppState) -> Router<AppState> {
    let resolved = Router::new().route("/realm", get(current_realm));
    let resolved = middleware::realm::apply(resolved, state);

    Router::new()
        .route("/health", get(health))
        .route("/realms", get(list_realms))
        .route("/upstream", any(preview_upstream))
        .merge(resolved)
}

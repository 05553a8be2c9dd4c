//! Inbound realm resolution -> RealmCtx in request extensions
//!
//! - Resolves the realm from the bearer token issuer (strict mode)
//! - Rejects with 401 + `WWW-Authenticate: Bearer realm="..."` when the realm is ambiguous
//! - Handlers read the result through `RealmCtxExtractor`

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::RealmCtx;
use crate::error::AppError;
use crate::state::AppState;

/// Apply realm resolution to every route of `router` (not its fallback).
///
/// ```ignore
/// let protected = middleware::realm::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(state, realm_middleware))
}

async fn realm_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let realm_ctx = match state.resolver.resolve_realm(req.headers()) {
        Ok(resolved) => RealmCtx::new(resolved.realm, resolved.config.clone()),
        Err(err) => {
            tracing::warn!(error = %err, "realm resolution failed");
            return Err(err);
        }
    };

    tracing::debug!(realm = %realm_ctx.realm, "realm resolved");

    // middleware -> extractor
    req.extensions_mut().insert(realm_ctx);

    Ok(next.run(req).await)
}

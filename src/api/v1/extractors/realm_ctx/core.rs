use axum::extract::FromRequestParts;
use axum::http::{StatusCode, request::Parts};

use crate::state::AppState;

use super::RealmCtx;

/// Extractor for the `RealmCtx` the realm middleware inserted.
/// Missing context means the route is not behind the middleware: 500, not 401.
pub struct RealmCtxExtractor(pub RealmCtx);

impl FromRequestParts<AppState> for RealmCtxExtractor
where
    AppState: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RealmCtx>()
            .cloned()
            .map(RealmCtxExtractor)
            .ok_or_else(|| {
                tracing::error!("RealmCtx missing: route is not behind the realm middleware");
                StatusCode::INTERNAL_SERVER_ERROR
            })
    }
}

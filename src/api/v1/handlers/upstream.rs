/*
 * Responsibility
 * - GET /upstream: where a proxied request from this caller would be sent
 * - Builds the outgoing request the way a proxy would and runs the RequestInterceptor
 * - Nothing is sent upstream
 */
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, Method, Request, header},
};

use crate::api::v1::dto::realm::UpstreamResponse;
use crate::error::AppError;
use crate::state::AppState;

pub async fn preview_upstream(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
) -> Result<Json<UpstreamResponse>, AppError> {
    let mut outgoing = Request::builder().method(method.clone());
    if let Some(authorization) = headers.get(header::AUTHORIZATION) {
        outgoing = outgoing.header(header::AUTHORIZATION, authorization.clone());
    }

    let outgoing = state.interceptor.apply(outgoing).inspect_err(|err| {
        tracing::error!(error = %err, "outbound realm routing failed");
    })?;

    let realm_uri = outgoing
        .uri_ref()
        .map(ToString::to_string)
        .unwrap_or_default();

    Ok(Json(UpstreamResponse {
        method: method.to_string(),
        realm_uri,
    }))
}

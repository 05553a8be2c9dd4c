#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use jsonwebtoken::{EncodingKey, Header};
use serde_json::{Value, json};
use tower::ServiceExt;

use realm_gateway::app::build_router;
use realm_gateway::services::realm::{AuthConfig, RealmConfigStore};
use realm_gateway::state::AppState;

/// `public` (default) -> http://pub, `acme` -> http://acme
pub fn scenario_store() -> RealmConfigStore {
    RealmConfigStore::from_json(
        r#"{
            "default_realm": "public",
            "realms": [
                { "name": "public", "service_url": "http://pub" },
                { "name": "acme", "service_url": "http://acme", "audience": "acme-api" }
            ]
        }"#,
    )
    .unwrap()
}

pub fn create_test_app() -> Router {
    create_app_with(scenario_store())
}

pub fn create_app_with(store: RealmConfigStore) -> Router {
    build_router(AppState::new(Arc::new(store)))
}

pub fn store_without_default() -> RealmConfigStore {
    RealmConfigStore::new("ghost", [("acme", AuthConfig::new("http://acme"))])
}

pub fn unsigned_token(issuer: &str) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(json!({ "iss": issuer, "sub": "u-1" }).to_string());
    format!("{header}.{payload}.")
}

/// HS256 token signed with a key the gateway never sees.
pub fn signed_token(issuer: &str) -> String {
    jsonwebtoken::encode(
        &Header::default(),
        &json!({ "iss": issuer, "sub": "u-1", "exp": 1 }),
        &EncodingKey::from_secret(b"not-known-to-the-gateway"),
    )
    .unwrap()
}

pub async fn get(app: Router, uri: &str, authorization: Option<&str>) -> Response<Body> {
    let mut request = Request::builder().uri(uri);
    if let Some(value) = authorization {
        request = request.header(header::AUTHORIZATION, value);
    }

    app.oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn json_body(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

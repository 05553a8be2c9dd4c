/*
 * Responsibility
 * - Application-level error carried up to the HTTP layer (status / reason / headers)
 * - IntoResponse (JSON error body + WWW-Authenticate challenge on 401)
 * - RealmError -> AppError mapping for the inbound and outbound paths
 */
use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::services::realm::{RealmConfigStore, RealmError};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    /// 401 with a `Bearer` challenge listing the configured realms.
    #[error("unauthorized: {reason}")]
    Unauthorized { reason: RealmError, challenge: String },
    #[error("internal server error: {0}")]
    Internal(RealmError),
}

impl AppError {
    pub fn unauthorized(reason: RealmError, store: &RealmConfigStore) -> Self {
        Self::Unauthorized {
            reason,
            challenge: store.bearer_challenge(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn reason(&self) -> &RealmError {
        match self {
            AppError::Unauthorized { reason, .. } => reason,
            AppError::Internal(reason) => reason,
        }
    }

    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let AppError::Unauthorized { challenge, .. } = self {
            match HeaderValue::from_str(challenge) {
                Ok(value) => {
                    headers.insert(header::WWW_AUTHENTICATE, value);
                }
                // Realm names come from config; a control character there
                // cannot be sent in a header.
                Err(e) => error!(error = %e, %challenge, "unrepresentable WWW-Authenticate challenge"),
            }
        }
        headers
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = match self {
            AppError::Unauthorized { .. } => "UNAUTHORIZED",
            AppError::Internal(_) => "INTERNAL_SERVER_ERROR",
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code,
                message: self.reason().to_string(),
            },
        };

        (self.status(), self.headers(), Json(body)).into_response()
    }
}

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::{error, warn};

use common::types::ErrorBody;
use service::auth::errors::AuthError;
use service::errors::ServiceError;
use service::validation::FieldErrors;

/// Error returned by every JSON handler.
///
/// Validation failures render as a bare `{field: [messages]}` map; everything
/// else renders as [`ErrorBody`].
#[derive(Debug)]
pub enum JsonApiError {
    Fields(FieldErrors),
    Status { status: StatusCode, body: ErrorBody },
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &str, detail: Option<String>) -> Self {
        Self::Status { status, body: ErrorBody { error: error.to_string(), detail } }
    }

    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized", Some(detail.into()))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Fields(_) => StatusCode::BAD_REQUEST,
            Self::Status { status, .. } => *status,
        }
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(fields) => Self::Fields(fields),
            ServiceError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, "Not Found", Some(msg)),
            ServiceError::Conflict(msg) => Self::new(StatusCode::CONFLICT, "Conflict", Some(msg)),
            ServiceError::Db(msg) => {
                error!(error = %msg, "database error");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "DB Error", None)
            }
        }
    }
}

impl From<FieldErrors> for JsonApiError {
    fn from(e: FieldErrors) -> Self { Self::Fields(e) }
}

impl From<AuthError> for JsonApiError {
    fn from(e: AuthError) -> Self {
        if e.is_unauthorized() {
            warn!(code = e.code(), error = %e, "authentication failed");
            match e {
                AuthError::MissingToken => Self::unauthorized("Authentication credentials were not provided."),
                _ => Self::unauthorized("Invalid or expired token."),
            }
        } else {
            error!(code = e.code(), error = %e, "authentication backend error");
            Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Auth Error", None)
        }
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(e: JsonRejection) -> Self {
        Self::Fields(FieldErrors::single("non_field_errors", format!("JSON parse error - {}", e.body_text())))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Fields(fields) => (StatusCode::BAD_REQUEST, Json(fields)).into_response(),
            Self::Status { status, body } => (status, Json(body)).into_response(),
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

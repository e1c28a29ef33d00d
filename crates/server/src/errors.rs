use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use common::types::{ErrorResponse, FieldError};
use service::ServiceError;

/// Error surface of the HTTP layer. Everything that leaves a handler
/// collapses into the uniform `{ message, errors }` envelope the UI
/// understands.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("{0}")]
    Unauthorized(&'static str),
    #[error("{message}")]
    BadRequest {
        message: String,
        errors: Vec<FieldError>,
    },
}

impl ApiError {
    pub fn unauthorized(message: &'static str) -> Self {
        ApiError::Unauthorized(message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            message: message.into(),
            errors: Vec::new(),
        }
    }

    /// A 400 carrying a single field error, mirroring the shape the
    /// services produce for validation failures.
    pub fn bad_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let err = FieldError::new(field, message);
        ApiError::BadRequest {
            message: err.message.clone(),
            errors: vec![err],
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            ApiError::Service(err) => {
                if err.status() >= 500 {
                    error!(error = %err, "request failed with internal error");
                }
                let status = StatusCode::from_u16(err.status())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, err.public_message(), err.field_errors())
            }
            ApiError::Unauthorized(message) => {
                (StatusCode::UNAUTHORIZED, message.to_string(), Vec::new())
            }
            ApiError::BadRequest { message, errors } => {
                (StatusCode::BAD_REQUEST, message, errors)
            }
        };
        (status, Json(ErrorResponse { message, errors })).into_response()
    }
}

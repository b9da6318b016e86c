//! Maps the domain error taxonomy onto HTTP responses.
//!
//! Every failure leaves the API as `{ "message": ..., "code": ... }`
//! with `code` mirroring the HTTP status; internals are never exposed.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domains::AppError;
use serde::Serialize;
use tracing::error;

#[derive(Debug)]
pub struct ApiError(pub AppError);

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
    code: u16,
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            AppError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::Unauthenticated(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::NotFound(kind, id) => {
                (StatusCode::NOT_FOUND, format!("{kind} {id} does not exist."))
            }
            AppError::Internal(detail) => {
                error!(detail = %detail, "internal error reached the API boundary");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong. Please try again.".to_string(),
                )
            }
        };
        let body = ErrorBody {
            message,
            code: status.as_u16(),
        };
        (status, Json(body)).into_response()
    }
}

mod categories;
mod questions;
mod quizzes;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::db::StoreError;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quizzes_router;

/// Failures reported to clients as `{success: false, error, message}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    BadRequest,
    NotFound,
    MethodNotAllowed,
    Unprocessable,
    Internal,
}

pub type ApiResult<T> = Result<T, ApiError>;
pub type ApiResponse<T> = ApiResult<Json<T>>;

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: u16,
    message: &'static str,
}

impl ApiError {
    pub fn status(self) -> StatusCode {
        match self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ApiError::BadRequest => "bad request",
            ApiError::NotFound => "resource not found",
            ApiError::MethodNotAllowed => "method not allowed",
            ApiError::Unprocessable => "unable to process request",
            ApiError::Internal => "internal server error",
        }
    }

    /// Store failures while creating or deleting: everything except a missing
    /// row means the write could not be carried out.
    pub fn from_write(error: StoreError) -> ApiError {
        match error {
            StoreError::NotFound => ApiError::NotFound,
            StoreError::Constraint(message) => {
                tracing::warn!("Write rejected by store: {message}");
                ApiError::Unprocessable
            }
            other => {
                tracing::warn!("Write failed: {other}");
                ApiError::Unprocessable
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> ApiError {
        match error {
            StoreError::NotFound => ApiError::NotFound,
            StoreError::Constraint(message) => {
                tracing::warn!("Constraint violation: {message}");
                ApiError::Unprocessable
            }
            other => {
                tracing::error!("Store failure: {other}");
                ApiError::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            success: false,
            error: self.status().as_u16(),
            message: self.message(),
        };
        (self.status(), Json(body)).into_response()
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::repository::repository_error::RepositoryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HandlerErrorKind {
    NotFound,
    Validation,
    Internal,
    Unauthorized,
    Conflict,
    BadRequest,
    PayloadTooLarge,
}

impl std::fmt::Display for HandlerErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HandlerErrorKind::NotFound => "NotFound",
            HandlerErrorKind::Validation => "Validation",
            HandlerErrorKind::Internal => "Internal",
            HandlerErrorKind::Unauthorized => "Unauthorized",
            HandlerErrorKind::Conflict => "Conflict",
            HandlerErrorKind::BadRequest => "BadRequest",
            HandlerErrorKind::PayloadTooLarge => "PayloadTooLarge",
        };
        write!(f, "{}", s)
    }
}

impl HandlerErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            HandlerErrorKind::NotFound => StatusCode::NOT_FOUND,
            HandlerErrorKind::Validation | HandlerErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            HandlerErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            HandlerErrorKind::Conflict => StatusCode::CONFLICT,
            HandlerErrorKind::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            HandlerErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error returned by handlers and middleware.
///
/// Rendered as `{"error": "<message>"}` with the status picked by `error`.
#[derive(Debug)]
pub struct HandlerError {
    pub error: HandlerErrorKind,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl HandlerError {
    pub fn new<T: Into<String>>(error: HandlerErrorKind, message: T) -> Self {
        HandlerError { error, message: message.into() }
    }

    pub fn bad_request<T: Into<String>>(message: T) -> Self {
        Self::new(HandlerErrorKind::BadRequest, message)
    }

    pub fn unauthorized<T: Into<String>>(message: T) -> Self {
        Self::new(HandlerErrorKind::Unauthorized, message)
    }

    pub fn not_found<T: Into<String>>(message: T) -> Self {
        Self::new(HandlerErrorKind::NotFound, message)
    }

    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::new(HandlerErrorKind::Internal, message)
    }
}

impl std::fmt::Display for HandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for HandlerError {}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody { error: &self.message });
        (self.error.status(), body).into_response()
    }
}

/// Business-level failure. Every message is safe to show to a client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error("Not Found: {0}")]
    NotFound(String),
    #[error("Invalid Input: {0}")]
    InvalidInput(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Internal Error: {0}")]
    InternalError(String),
    #[error("Conflict: {0}")]
    Conflict(String),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => ServiceError::NotFound(msg),
            RepositoryError::ValidationError(msg) => ServiceError::InvalidInput(msg),
            RepositoryError::AlreadyExists(msg) => ServiceError::Conflict(msg),
            other => {
                // driver details stay in the logs
                error!("Store failure: {}", other);
                ServiceError::InternalError("Database error".to_string())
            }
        }
    }
}

impl From<ServiceError> for HandlerError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(msg) => HandlerError::not_found(msg),
            ServiceError::InvalidInput(msg) => HandlerError::bad_request(msg),
            ServiceError::Unauthorized(msg) => HandlerError::unauthorized(msg),
            ServiceError::Conflict(msg) => HandlerError::new(HandlerErrorKind::Conflict, msg),
            ServiceError::InternalError(msg) => HandlerError::internal(msg),
        }
    }
}

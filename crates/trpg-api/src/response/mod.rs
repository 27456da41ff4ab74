//! Response types and error handling for API endpoints
//!
//! Every response, success or failure, uses the `{code, message, data}` envelope.

use std::borrow::Cow;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use trpg_common::{domain_status, AppError, ErrorResponse};
use trpg_core::DomainError;
use trpg_service::ServiceError;
use validator::ValidationErrors;

/// Message used in place of any 5xx detail
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// API error type for consistent error responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    App(#[from] AppError),

    #[error("{0}")]
    Service(#[from] ServiceError),

    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Validation failed")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid path parameter: {0}")]
    InvalidPath(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Authorization header required")]
    MissingAuth,

    #[error("Invalid authorization header format")]
    InvalidAuthFormat,

    #[error("Route not found")]
    RouteNotFound,

    #[error("Request timed out")]
    Timeout,

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

fn status_from(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

impl ApiError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::App(e) => status_from(e.status_code()),
            Self::Service(e) => status_from(e.status_code()),
            Self::Domain(e) => status_from(domain_status(e)),
            Self::Validation(_) | Self::InvalidPath(_) | Self::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::MissingAuth | Self::InvalidAuthFormat => StatusCode::UNAUTHORIZED,
            Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::Timeout => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &str {
        match self {
            Self::App(e) => e.error_code(),
            Self::Service(e) => e.error_code(),
            Self::Domain(e) => e.code(),
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidPath(_) => "INVALID_PATH_PARAMETER",
            Self::InvalidBody(_) => "INVALID_BODY",
            Self::MissingAuth => "MISSING_AUTHORIZATION",
            Self::InvalidAuthFormat => "INVALID_AUTHORIZATION_FORMAT",
            Self::RouteNotFound => "NOT_FOUND",
            Self::Timeout => "REQUEST_TIMEOUT",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }

    /// Create an invalid path parameter error
    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::InvalidPath(msg.into())
    }

    /// Create an invalid body error
    pub fn invalid_body(msg: impl Into<String>) -> Self {
        Self::InvalidBody(msg.into())
    }

    /// Build the envelope for this error
    pub fn to_envelope(&self) -> ErrorResponse {
        let status = self.status_code();

        if status.is_server_error() && !matches!(self, Self::Timeout) {
            return ErrorResponse::new(status.as_u16(), INTERNAL_ERROR_MESSAGE);
        }

        let envelope = ErrorResponse::new(status.as_u16(), self.to_string());
        let details = match self {
            Self::Validation(errors) | Self::Service(ServiceError::InvalidFields(errors)) => {
                serde_json::to_value(errors).ok()
            }
            _ => None,
        };
        match details {
            Some(details) => envelope.with_data(details),
            None => envelope,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() && !matches!(self, Self::Timeout) {
            error!(error = ?self, code = self.error_code(), "Server error occurred");
        }

        (status, Json(self.to_envelope())).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

/// Successful envelope: HTTP 200 with `{code: 200, message, data}`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: Cow<'static, str>,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Payload with the generic "Success" message
    pub fn ok(data: T) -> Self {
        Self::with_message("Success", data)
    }

    pub fn with_message(message: impl Into<Cow<'static, str>>, data: T) -> Self {
        Self {
            code: StatusCode::OK.as_u16(),
            message: message.into(),
            data,
        }
    }
}

impl ApiResponse<()> {
    /// Message only; `data` serializes as `null`
    pub fn message(message: impl Into<Cow<'static, str>>) -> Self {
        Self::with_message(message, ())
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (status_from(self.code), Json(self)).into_response()
    }
}

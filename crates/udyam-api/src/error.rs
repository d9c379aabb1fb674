//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Every failure is answered with the same envelope the success paths use,
//! `{ "success": false, "message": ... }`, so clients need one decoder.
//! Internal error details are logged, never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use udyam_core::ProviderError;

/// Message returned for every 500.
pub const INTERNAL_MESSAGE: &str = "Something went wrong!";

/// Message returned for unmatched routes.
pub const NOT_FOUND_MESSAGE: &str = "Route not found";

/// Message returned when a client exceeds the rate limit.
pub const RATE_LIMITED_MESSAGE: &str = "Too many requests from this IP, please try again later.";

/// JSON failure payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FailureBody {
    /// Always `false`.
    pub success: bool,
    /// Human-readable message.
    pub message: String,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Request body could not be parsed (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Request failed a business rule (400).
    #[error("validation error: {0}")]
    Validation(String),

    /// Request body exceeds the size limit (413).
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),

    /// Request body has a content type no extractor handles (415).
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// No route or resource (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Client exceeded the rate limit (429).
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// The verification backend is unreachable (503).
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            Self::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE"),
            Self::UnsupportedMediaType(_) => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, "UNSUPPORTED_MEDIA_TYPE")
            }
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::RateLimited(_) => (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMITED"),
            Self::Unavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    /// Map a body extractor rejection, keeping its status.
    pub fn from_rejection(status: StatusCode, message: String) -> Self {
        match status {
            StatusCode::PAYLOAD_TOO_LARGE => Self::PayloadTooLarge(message),
            StatusCode::UNSUPPORTED_MEDIA_TYPE => Self::UnsupportedMediaType(message),
            s if s.is_server_error() => Self::Internal(message),
            _ => Self::BadRequest(message),
        }
    }

    /// The message clients see.
    fn client_message(&self) -> String {
        match self {
            Self::BadRequest(m)
            | Self::Validation(m)
            | Self::PayloadTooLarge(m)
            | Self::UnsupportedMediaType(m)
            | Self::NotFound(m)
            | Self::RateLimited(m)
            | Self::Unavailable(m) => m.clone(),
            Self::Internal(_) => INTERNAL_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        if status.is_server_error() {
            tracing::error!(error = %self, code, "request failed");
        } else {
            tracing::debug!(error = %self, code, "request rejected");
        }

        let body = FailureBody {
            success: false,
            message: self.client_message(),
        };
        (status, Json(body)).into_response()
    }
}

/// Convert provider failures to API errors.
impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Rejected { message } => Self::BadRequest(message),
            ProviderError::RateLimited { message } => Self::RateLimited(message),
            ProviderError::Unavailable { reason } => {
                tracing::warn!(%reason, "verification provider unavailable");
                Self::Unavailable("Verification service unavailable. Please try again.".into())
            }
            ProviderError::InvalidResponse { reason } => Self::Internal(reason),
        }
    }
}

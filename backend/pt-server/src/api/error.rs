//! REST API error types
//!
//! The single place where failures become HTTP status codes. Every error
//! renders as `{"error": "<message>"}`.

use pt_store::StoreError;

use std::panic::Location;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;
use tokio::task::JoinError;

pub const NOT_FOUND_MESSAGE: &str = "patient not found";
pub const TIMEOUT_MESSAGE: &str = "request timeout";
pub const INVALID_BODY_MESSAGE: &str = "invalid request body";

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: String,
}

/// API errors with associated HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed request body (400)
    #[error("Bad request: {message} {location}")]
    BadRequest {
        message: String,
        location: ErrorLocation,
    },

    /// No patient with the requested id (404)
    #[error("Resource not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    /// Storage call exceeded the request deadline (408)
    #[error("Request timed out {location}")]
    Timeout { location: ErrorLocation },

    /// Internal server error (500)
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    /// 400 with the generic message used by the edit/delete routes
    #[track_caller]
    pub fn invalid_body(rejection: JsonRejection) -> Self {
        log::warn!("Rejected request body: {}", rejection.body_text());
        ApiError::BadRequest {
            message: INVALID_BODY_MESSAGE.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// 500 for any storage error, including not-found (edit route)
    #[track_caller]
    pub fn store_failure(e: StoreError) -> Self {
        log::error!("{}", e);
        ApiError::Internal {
            message: e.detail(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Timeout { .. } => StatusCode::REQUEST_TIMEOUT,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            ApiError::Internal { .. } => log::error!("{}", self),
            _ => log::warn!("{}", self),
        }

        let message = match self {
            ApiError::BadRequest { message, .. }
            | ApiError::NotFound { message, .. }
            | ApiError::Internal { message, .. } => message,
            ApiError::Timeout { .. } => TIMEOUT_MESSAGE.to_string(),
        };

        (status, Json(ApiErrorResponse { error: message })).into_response()
    }
}

/// Decoder failures are echoed back to the client
impl From<JsonRejection> for ApiError {
    #[track_caller]
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest {
            message: rejection.body_text(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<StoreError> for ApiError {
    #[track_caller]
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { guid, .. } => {
                log::debug!("No patient with GUID {}", guid);
                ApiError::NotFound {
                    message: NOT_FOUND_MESSAGE.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                }
            }
            other => ApiError::store_failure(other),
        }
    }
}

/// A storage task that panicked or was aborted
impl From<JoinError> for ApiError {
    #[track_caller]
    fn from(e: JoinError) -> Self {
        ApiError::Internal {
            message: format!("storage task failed: {}", e),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

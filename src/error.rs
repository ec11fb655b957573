//! Error types for the content cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Programmer errors raised when a cache is constructed or used incorrectly.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// A cache must be able to hold at least one entry
    #[error("Invalid cache capacity: max size must be at least 1, got {0}")]
    InvalidCapacity(usize),
}

// == Fetch Error Enum ==
/// Failures of a remote fetch against the content API.
///
/// These only reach callers when there is no cached value to fall back on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request failed before a response was obtained
    #[error("Transport error: {message}")]
    Transport { message: String, timed_out: bool },

    /// The server answered with a non-2xx status
    #[error("HTTP {status_code} from {url}")]
    Http { status_code: u16, url: String },

    /// The response body did not match the expected document shape
    #[error("Decode error: {0}")]
    Decode(String),
}

impl FetchError {
    /// Builds a transport error that was not caused by a timeout.
    pub fn transport(message: impl Into<String>) -> Self {
        FetchError::Transport {
            message: message.into(),
            timed_out: false,
        }
    }

    /// Builds an HTTP status error.
    pub fn http(status_code: u16, url: impl Into<String>) -> Self {
        FetchError::Http {
            status_code,
            url: url.into(),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return FetchError::Decode(err.to_string());
        }
        FetchError::Transport {
            timed_out: err.is_timeout(),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for FetchError {
    fn into_response(self) -> Response {
        let status = match &self {
            FetchError::Http {
                status_code: 404, ..
            } => StatusCode::NOT_FOUND,
            FetchError::Http { .. } => StatusCode::BAD_GATEWAY,
            FetchError::Transport {
                timed_out: true, ..
            } => StatusCode::GATEWAY_TIMEOUT,
            FetchError::Transport { .. } => StatusCode::BAD_GATEWAY,
            FetchError::Decode(_) => StatusCode::BAD_GATEWAY,
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Umbrella Error ==
/// Errors raised while wiring caches and clients together.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

// == Result Type Aliases ==
/// Result of a cache construction.
pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// Result of a remote fetch or a load that may fall through to one.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

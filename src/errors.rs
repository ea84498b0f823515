//! Error types and handling for the Vaulty SDK
//!
//! This module defines the error types that can be returned by SDK operations.
//! There are two layers:
//!
//! - **API errors** ([`ApiError`]): the server answered with a non-2xx status.
//!   A closed set of variants keyed by status code, each carrying the status,
//!   a human message, and the server-supplied `detail` string when present.
//! - **Transport errors**: no usable response was obtained (connection
//!   failures, timeouts, decode errors). These are never coerced into the API
//!   taxonomy so callers can distinguish "the server said no" from "we never
//!   heard back".
//!
//! # Example
//!
//! ```no_run
//! # use vaulty_sdk::{VaultyClient, Error, ApiError};
//! # async fn example(client: &VaultyClient) -> Result<(), Box<dyn std::error::Error>> {
//! match client.projects.get("p-123").await {
//!     Ok(project) => println!("Found {}", project.name),
//!     Err(Error::Api(ApiError::NotFound { .. })) => println!("No such project"),
//!     Err(Error::Api(ApiError::RateLimit { retry_after, .. })) => {
//!         println!("Rate limited, retry after {:?}s", retry_after)
//!     }
//!     Err(e) => return Err(e.into()),
//! }
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

/// Result type alias for the SDK
pub type Result<T> = std::result::Result<T, Error>;

/// Classified error derived from a non-2xx HTTP response
///
/// Every variant carries the raw status code, a fixed human message, and the
/// `detail` string extracted from the response body (if any). An `ApiError`
/// is constructed exactly once, at the transport boundary where the response
/// is classified, and is immutable afterwards.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed (401)
    #[error("{message} (status {status})")]
    Authentication {
        /// HTTP status code
        status: u16,
        /// Human-readable message
        message: String,
        /// Server-supplied detail text
        detail: Option<String>,
    },

    /// Insufficient permissions (403)
    #[error("{message} (status {status})")]
    Authorization {
        /// HTTP status code
        status: u16,
        /// Human-readable message
        message: String,
        /// Server-supplied detail text
        detail: Option<String>,
    },

    /// Resource not found (404)
    #[error("{message} (status {status})")]
    NotFound {
        /// HTTP status code
        status: u16,
        /// Human-readable message
        message: String,
        /// Server-supplied detail text
        detail: Option<String>,
    },

    /// Request validation failed (400 or 422)
    #[error("{message} (status {status})")]
    Validation {
        /// HTTP status code
        status: u16,
        /// Human-readable message
        message: String,
        /// Server-supplied detail text
        detail: Option<String>,
    },

    /// Rate limit exceeded (429)
    #[error("{message} (status {status})")]
    RateLimit {
        /// HTTP status code
        status: u16,
        /// Human-readable message
        message: String,
        /// Server-supplied detail text
        detail: Option<String>,
        /// Server-suggested wait, from the `Retry-After` header (seconds)
        retry_after: Option<u64>,
    },

    /// Server-side error (5xx)
    #[error("{message} (status {status})")]
    Server {
        /// HTTP status code
        status: u16,
        /// Human-readable message
        message: String,
        /// Server-supplied detail text
        detail: Option<String>,
    },

    /// Any other non-success status
    #[error("{message} (status {status})")]
    Generic {
        /// HTTP status code
        status: u16,
        /// Human-readable message
        message: String,
        /// Server-supplied detail text
        detail: Option<String>,
    },
}

impl ApiError {
    /// Classify a failed exchange by status code
    ///
    /// `retry_after` is only attached to the 429 variant; it is ignored for
    /// every other status.
    pub fn from_status(status: u16, detail: Option<String>, retry_after: Option<u64>) -> Self {
        match status {
            401 => ApiError::Authentication {
                status,
                message: "Authentication failed".to_string(),
                detail,
            },
            403 => ApiError::Authorization {
                status,
                message: "Insufficient permissions".to_string(),
                detail,
            },
            404 => ApiError::NotFound {
                status,
                message: "Resource not found".to_string(),
                detail,
            },
            400 | 422 => ApiError::Validation {
                status,
                message: "Request validation failed".to_string(),
                detail,
            },
            429 => ApiError::RateLimit {
                status,
                message: "Rate limit exceeded".to_string(),
                detail,
                retry_after,
            },
            500..=599 => ApiError::Server {
                status,
                message: "Server error".to_string(),
                detail,
            },
            _ => ApiError::Generic {
                status,
                message: format!("Unexpected response status {}", status),
                detail,
            },
        }
    }

    /// The HTTP status code that produced this error
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Authentication { status, .. }
            | ApiError::Authorization { status, .. }
            | ApiError::NotFound { status, .. }
            | ApiError::Validation { status, .. }
            | ApiError::RateLimit { status, .. }
            | ApiError::Server { status, .. }
            | ApiError::Generic { status, .. } => *status,
        }
    }

    /// The server-supplied detail text, if any
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Authentication { detail, .. }
            | ApiError::Authorization { detail, .. }
            | ApiError::NotFound { detail, .. }
            | ApiError::Validation { detail, .. }
            | ApiError::RateLimit { detail, .. }
            | ApiError::Server { detail, .. }
            | ApiError::Generic { detail, .. } => detail.as_deref(),
        }
    }

    /// The `Retry-After` hint in seconds (429 responses only)
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            ApiError::RateLimit { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}

/// Main error type for the SDK
#[derive(Error, Debug)]
pub enum Error {
    /// The server answered with a non-2xx status
    #[error("api: {0}")]
    Api(#[from] ApiError),

    /// Connection-level failure (refused, reset, DNS)
    #[error("network: {0}")]
    Network(String),

    /// Request deadline exceeded
    #[error("timeout")]
    Timeout,

    /// Failed to parse an API response
    #[error("deserialize: {0}")]
    Deserialize(String),

    /// Invalid client configuration
    #[error("config: {0}")]
    Config(String),

    /// Other errors
    #[error("other: {0}")]
    Other(String),
}

impl Error {
    /// Check whether the retry engine may re-attempt after this error
    ///
    /// Client-side semantic errors (400/401/403/404/422) cannot succeed on a
    /// retry and always propagate immediately. Everything else, including
    /// errors the taxonomy does not recognize, counts as transient.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            Error::Api(
                ApiError::Authentication { .. }
                    | ApiError::Authorization { .. }
                    | ApiError::NotFound { .. }
                    | ApiError::Validation { .. }
            )
        )
    }

    /// Get the HTTP status code if the server answered
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Api(api) => Some(api.status_code()),
            _ => None,
        }
    }

    /// Get the rate-limit retry hint, if present
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            Error::Api(api) => api.retry_after(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout
        } else if err.is_connect() || err.is_request() {
            Error::Network(err.to_string())
        } else if err.is_decode() {
            Error::Deserialize(err.to_string())
        } else {
            Error::Other(err.to_string())
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Deserialize(err.to_string())
    }
}

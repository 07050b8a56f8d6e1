//! Custom error types for the application.
//!
//! Provides structured error handling with meaningful error messages:
//!
//! - [`FetchError`] - Network/fetch-related errors for HTTP requests
//!
//! Failed fetches leave client state untouched and are surfaced to the
//! caller; there are no automatic retries anywhere. A completed fetch that
//! has been superseded by a newer one is not an error at all; it is
//! discarded silently (see `core::navigation`).

use std::fmt;

/// Network/fetch-related errors for HTTP requests.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Browser window not available
    NoWindow,
    /// Failed to create HTTP request
    RequestCreationFailed,
    /// Network request failed (timeout, CORS, etc.)
    NetworkError(String),
    /// HTTP error response (non-2xx status)
    HttpError(u16),
    /// Failed to read response body
    ResponseReadFailed,
    /// Invalid response content (not text)
    InvalidContent,
    /// JSON parsing error
    JsonParseError(String),
    /// Backend reported an application-level error (non-zero code)
    ApiError(i32, String),
    /// Request timed out
    Timeout,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWindow => write!(f, "Browser window not available"),
            Self::RequestCreationFailed => write!(f, "Failed to create request"),
            Self::NetworkError(msg) => write!(f, "Network error: {}", msg),
            Self::HttpError(status) => write!(f, "HTTP error: {}", status),
            Self::ResponseReadFailed => write!(f, "Failed to read response"),
            Self::InvalidContent => write!(f, "Invalid response content"),
            Self::JsonParseError(msg) => write!(f, "JSON parse error: {}", msg),
            Self::ApiError(code, msg) => write!(f, "API error {}: {}", code, msg),
            Self::Timeout => write!(f, "Request timed out"),
        }
    }
}

impl std::error::Error for FetchError {}

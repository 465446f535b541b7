//! Network-related error types.
//!
//! These are transport failures: the request never produced a response we
//! could read. Errors the backend reports in a response body are
//! [`ProtocolError`](super::ProtocolError)s instead.

use std::fmt;

use crate::traits::HttpError;

/// Network-specific error variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// Connection to the server failed.
    ConnectionFailed { url: String, message: String },

    /// Request timed out.
    Timeout { url: String, message: String },

    /// The URL built from the configured base URL was rejected.
    InvalidUrl { url: String },

    /// The response body could not be read.
    Io { url: String, message: String },

    /// Generic network error.
    Other { message: String },
}

impl NetworkError {
    /// Classify an [`HttpError`] returned by an [`HttpClient`](crate::traits::HttpClient).
    pub fn from_http(err: HttpError, url: &str) -> Self {
        match err {
            HttpError::ConnectionFailed(message) => NetworkError::ConnectionFailed {
                url: url.to_string(),
                message,
            },
            HttpError::Timeout(message) => NetworkError::Timeout {
                url: url.to_string(),
                message,
            },
            HttpError::InvalidUrl(_) => NetworkError::InvalidUrl {
                url: url.to_string(),
            },
            HttpError::Io(message) => NetworkError::Io {
                url: url.to_string(),
                message,
            },
            HttpError::Other(message) => NetworkError::Other { message },
        }
    }

    /// Check if this error is likely transient and can be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            NetworkError::ConnectionFailed { .. } => true,
            NetworkError::Timeout { .. } => true,
            NetworkError::Io { .. } => true,
            NetworkError::InvalidUrl { .. } => false,
            NetworkError::Other { .. } => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            NetworkError::ConnectionFailed { url, .. } => {
                format!("Unable to reach the backend at {}. Is it running?", url)
            }
            NetworkError::Timeout { .. } => {
                "The backend took too long to respond. Please try again.".to_string()
            }
            NetworkError::InvalidUrl { url } => {
                format!("The backend URL '{}' is not valid. Check SUPEREGO_API_BASE_URL.", url)
            }
            NetworkError::Io { .. } => {
                "The connection was interrupted while reading the response.".to_string()
            }
            NetworkError::Other { message } => format!("Network error: {}", message),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed { .. } => "E_NET_CONN",
            NetworkError::Timeout { .. } => "E_NET_TIMEOUT",
            NetworkError::InvalidUrl { .. } => "E_NET_URL",
            NetworkError::Io { .. } => "E_NET_IO",
            NetworkError::Other { .. } => "E_NET_OTHER",
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::ConnectionFailed { url, message } => {
                write!(f, "Connection failed to '{}': {}", url, message)
            }
            NetworkError::Timeout { url, message } => {
                write!(f, "Request to '{}' timed out: {}", url, message)
            }
            NetworkError::InvalidUrl { url } => write!(f, "Invalid URL: {}", url),
            NetworkError::Io { url, message } => {
                write!(f, "Failed reading response from '{}': {}", url, message)
            }
            NetworkError::Other { message } => write!(f, "Network error: {}", message),
        }
    }
}

impl std::error::Error for NetworkError {}

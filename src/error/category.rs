//! Error category classification for unified error handling.
//!
//! Categories drive retry decisions and the short description shown next to
//! a user-facing error message.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Connection, DNS or timeout failures talking to the backend.
    Network,

    /// The backend answered with an error status (HTTP 5xx).
    Server,

    /// The user has to act before retrying (missing API key, bad input).
    User,

    /// The backend answered with something we could not understand.
    Client,

    /// Local filesystem or encryption failures.
    System,
}

impl ErrorCategory {
    /// Returns true if errors in this category are generally transient.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Server => "server",
            ErrorCategory::User => "user",
            ErrorCategory::Client => "client",
            ErrorCategory::System => "system",
        }
    }

    /// Returns a user-friendly description of the category.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Network connectivity issue",
            ErrorCategory::Server => "Server-side issue",
            ErrorCategory::User => "User action required",
            ErrorCategory::Client => "Unexpected response",
            ErrorCategory::System => "Local system error",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

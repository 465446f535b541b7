//! Errors reported by the backend inside a readable response.

use std::fmt;

/// Backend-signalled failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// The backend answered `status: "needs_key"`, whatever the HTTP status.
    NeedsKey { message: String },

    /// Non-2xx response; `detail` is the body's `detail` or `message` field.
    HttpStatus { status: u16, detail: Option<String> },

    /// A 2xx response whose body did not match the expected shape.
    InvalidResponse { message: String },
}

impl ProtocolError {
    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ProtocolError::NeedsKey { message } => message.clone(),
            ProtocolError::HttpStatus { .. } => self.to_string(),
            ProtocolError::InvalidResponse { .. } => {
                "Received an invalid response from the backend.".to_string()
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ProtocolError::NeedsKey { .. } => "E_PROTO_NEEDS_KEY",
            ProtocolError::HttpStatus { .. } => "E_PROTO_HTTP",
            ProtocolError::InvalidResponse { .. } => "E_PROTO_INVALID",
        }
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::NeedsKey { message } => f.write_str(message),
            ProtocolError::HttpStatus { status, detail } => {
                write!(f, "HTTP error! Status: {}", status)?;
                if let Some(detail) = detail {
                    write!(f, " - {}", detail)?;
                }
                Ok(())
            }
            ProtocolError::InvalidResponse { message } => {
                write!(f, "Invalid response: {}", message)
            }
        }
    }
}

impl std::error::Error for ProtocolError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_key_displays_message_verbatim() {
        let err = ProtocolError::NeedsKey {
            message: "Please enter your API key".to_string(),
        };
        assert_eq!(err.to_string(), "Please enter your API key");
        assert_eq!(err.user_message(), "Please enter your API key");
    }

    #[test]
    fn test_http_status_with_and_without_detail() {
        let with = ProtocolError::HttpStatus {
            status: 500,
            detail: Some("db down".to_string()),
        };
        assert_eq!(with.to_string(), "HTTP error! Status: 500 - db down");

        let without = ProtocolError::HttpStatus {
            status: 502,
            detail: None,
        };
        assert_eq!(without.to_string(), "HTTP error! Status: 502");
    }
}

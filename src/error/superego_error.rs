//! Unified error type for the superego client.

use std::fmt;

use super::category::ErrorCategory;
use super::network::NetworkError;
use super::protocol::ProtocolError;
use super::storage::{CryptoError, StorageError};

/// Unified error type for the superego client.
///
/// `Clone` so that one failed backend call can be handed to every caller
/// waiting on the same single-flight request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuperegoError {
    /// Transport failure (no readable response).
    Network(NetworkError),

    /// The backend reported a failure.
    Protocol(ProtocolError),

    /// Writing to the durable store failed.
    Storage(StorageError),

    /// The credential could not be encrypted.
    Encryption(CryptoError),

    /// The provider/model directory could not be loaded.
    DirectoryLoad { message: String },
}

impl SuperegoError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            SuperegoError::Network(_) => ErrorCategory::Network,
            SuperegoError::Protocol(ProtocolError::NeedsKey { .. }) => ErrorCategory::User,
            SuperegoError::Protocol(ProtocolError::HttpStatus { status, .. }) => {
                if *status >= 500 {
                    ErrorCategory::Server
                } else {
                    ErrorCategory::User
                }
            }
            SuperegoError::Protocol(ProtocolError::InvalidResponse { .. }) => ErrorCategory::Client,
            SuperegoError::Storage(_) | SuperegoError::Encryption(_) => ErrorCategory::System,
            SuperegoError::DirectoryLoad { .. } => ErrorCategory::Server,
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            SuperegoError::Network(err) => err.is_retryable(),
            _ => self.category().is_retryable(),
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            SuperegoError::Network(err) => err.user_message(),
            SuperegoError::Protocol(err) => err.user_message(),
            SuperegoError::Storage(err) => err.to_string(),
            SuperegoError::Encryption(err) => err.to_string(),
            SuperegoError::DirectoryLoad { message } => message.clone(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            SuperegoError::Network(err) => err.error_code(),
            SuperegoError::Protocol(err) => err.error_code(),
            SuperegoError::Storage(err) => err.error_code(),
            SuperegoError::Encryption(_) => "E_CRYPTO",
            SuperegoError::DirectoryLoad { .. } => "E_DIRECTORY",
        }
    }
}

impl fmt::Display for SuperegoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuperegoError::Network(err) => write!(f, "{}", err),
            SuperegoError::Protocol(err) => write!(f, "{}", err),
            SuperegoError::Storage(err) => write!(f, "{}", err),
            SuperegoError::Encryption(err) => write!(f, "{}", err),
            SuperegoError::DirectoryLoad { message } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for SuperegoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SuperegoError::Network(err) => Some(err),
            SuperegoError::Protocol(err) => Some(err),
            SuperegoError::Storage(err) => Some(err),
            SuperegoError::Encryption(err) => Some(err),
            SuperegoError::DirectoryLoad { .. } => None,
        }
    }
}

// ============================================================================
// From implementations for automatic error conversion
// ============================================================================

impl From<NetworkError> for SuperegoError {
    fn from(err: NetworkError) -> Self {
        SuperegoError::Network(err)
    }
}

impl From<ProtocolError> for SuperegoError {
    fn from(err: ProtocolError) -> Self {
        SuperegoError::Protocol(err)
    }
}

impl From<StorageError> for SuperegoError {
    fn from(err: StorageError) -> Self {
        SuperegoError::Storage(err)
    }
}

impl From<CryptoError> for SuperegoError {
    fn from(err: CryptoError) -> Self {
        SuperegoError::Encryption(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_needs_key_is_user_category() {
        let err: SuperegoError = ProtocolError::NeedsKey {
            message: "Please enter your API key".to_string(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::User);
        assert!(!err.is_retryable());
        assert_eq!(err.to_string(), "Please enter your API key");
    }

    #[test]
    fn test_http_status_category_split() {
        let server: SuperegoError = ProtocolError::HttpStatus {
            status: 503,
            detail: None,
        }
        .into();
        assert_eq!(server.category(), ErrorCategory::Server);
        assert!(server.is_retryable());

        let client: SuperegoError = ProtocolError::HttpStatus {
            status: 422,
            detail: Some("bad provider".to_string()),
        }
        .into();
        assert_eq!(client.category(), ErrorCategory::User);
    }

    #[test]
    fn test_network_error_source() {
        let err: SuperegoError = NetworkError::Other {
            message: "x".to_string(),
        }
        .into();
        assert!(err.source().is_some());
        assert_eq!(err.error_code(), "E_NET_OTHER");
    }

    #[test]
    fn test_directory_load_has_no_source() {
        let err = SuperegoError::DirectoryLoad {
            message: "backend unreachable".to_string(),
        };
        assert!(err.source().is_none());
        assert_eq!(err.user_message(), "backend unreachable");
    }

    #[test]
    fn test_clone_preserves_equality() {
        let err: SuperegoError = CryptoError("bad".to_string()).into();
        assert_eq!(err.clone(), err);
    }
}

//! Errors from the local durable store and from key encryption.

use thiserror::Error;

/// Failure writing a value to the durable medium.
///
/// Reads never produce this error: a missing or corrupt record falls back
/// to the caller's default.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Failed to serialize '{key}': {message}")]
    Serialization { key: String, message: String },

    #[error("Failed to write '{key}': {message}")]
    Io { key: String, message: String },
}

impl StorageError {
    /// The durable key this error concerns.
    pub fn key(&self) -> &str {
        match self {
            StorageError::Serialization { key, .. } | StorageError::Io { key, .. } => key,
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::Serialization { .. } => "E_STORE_SER",
            StorageError::Io { .. } => "E_STORE_IO",
        }
    }
}

/// Failure turning a raw credential into its transmittable form.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Failed to encrypt API key: {0}")]
pub struct CryptoError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display_names_key() {
        let err = StorageError::Io {
            key: "superego_uiSessions".to_string(),
            message: "disk full".to_string(),
        };
        assert_eq!(err.key(), "superego_uiSessions");
        assert_eq!(
            err.to_string(),
            "Failed to write 'superego_uiSessions': disk full"
        );
    }

    #[test]
    fn test_crypto_error_display() {
        let err = CryptoError("no public key".to_string());
        assert_eq!(err.to_string(), "Failed to encrypt API key: no public key");
    }
}

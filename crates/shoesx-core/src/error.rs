//! Error types for the ShoesX storefront.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the storefront crates.
///
/// Only `InvalidArgument` is surfaced to callers of cart mutators. Storage and
/// remote sync failures are produced by collaborators and recovered inside the
/// engines (logged, never propagated past the public cart API).
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum ShopError {
    /// A required argument was missing or malformed
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Local persistent storage failed to read or write
    #[error("Storage failure: {0}")]
    Storage(String),

    /// Remote document store failed (network, permission, ...)
    #[error("Remote sync failure: {0}")]
    RemoteSync(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON"
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ShopError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an InvalidArgument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates a RemoteSync error
    pub fn remote_sync(message: impl Into<String>) -> Self {
        Self::RemoteSync(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an InvalidArgument error
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Check if this is a Storage error
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }

    /// Check if this is a RemoteSync error
    pub fn is_remote_sync(&self) -> bool {
        matches!(self, Self::RemoteSync(_))
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for ShopError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ShopError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ShopError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, ShopError>`.
pub type Result<T> = std::result::Result<T, ShopError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let err: ShopError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        match err {
            ShopError::Io { message } => {
                assert!(message.contains("gone"));
                assert!(message.contains("NotFound"));
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_json_error_conversion() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json");
        let err: ShopError = parse.unwrap_err().into();
        assert!(err.is_serialization());
    }

    #[test]
    fn test_predicates() {
        assert!(ShopError::invalid_argument("size").is_invalid_argument());
        assert!(ShopError::storage("disk full").is_storage());
        assert!(ShopError::remote_sync("offline").is_remote_sync());
        assert!(!ShopError::config("bad").is_storage());
    }
}

//! エラー型定義
//!
//! 統一エラー型（thiserror使用）

use thiserror::Error;

/// healthwatch error type
#[derive(Debug, Error)]
pub enum WatchError {
    /// Configuration error (missing credentials, bad listen address, ...)
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error (persistence reads/writes)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error (corrupt state file, bad payload)
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error (malformed API request)
    #[error("Validation error: {0}")]
    Validation(String),
}

impl WatchError {
    /// Returns a safe error message for external clients.
    ///
    /// API responses use this instead of the `Display` implementation so
    /// that file paths and other internal detail never cross the wire.
    /// Full error details are logged server-side only.
    pub fn external_message(&self) -> &'static str {
        match self {
            Self::Config(_) => "Configuration error",
            Self::Io(_) => "Storage error",
            Self::Serialization(_) => "Storage error",
            Self::NotFound(_) => "Not found",
            Self::Validation(_) => "Invalid request",
        }
    }
}

/// Result type alias
pub type WatchResult<T> = Result<T, WatchError>;

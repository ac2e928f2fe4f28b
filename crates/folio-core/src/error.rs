//! Error types for folio-core
//!
//! Nothing in the site is fatal: controllers log these and carry on. They
//! exist so collaborators can report failures explicitly.

use thiserror::Error;

/// Result type alias for folio operations
pub type Result<T> = std::result::Result<T, FolioError>;

/// Main error type for folio operations
#[derive(Error, Debug)]
pub enum FolioError {
    /// Persistence store errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Host platform errors
    #[error("Host error: {0}")]
    Host(#[from] HostError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Publication filter input errors
    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),
}

/// Key-value store errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The store cannot be reached (disabled, private mode, no window)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// A write was refused
    #[error("Write of {key} rejected: {reason}")]
    Rejected { key: String, reason: String },
}

/// Errors reported by the host platform
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// Entering or leaving fullscreen was refused
    #[error("Fullscreen request rejected: {0}")]
    Fullscreen(String),

    /// Offline worker registration failed
    #[error("Offline worker registration failed: {0}")]
    WorkerRegistration(String),

    /// The platform lacks the capability
    #[error("Unsupported: {0}")]
    Unsupported(String),
}

/// Configuration validation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Value is out of valid range
    #[error("Value out of range: {0}")]
    OutOfRange(String),

    /// Bounds are inconsistent with each other
    #[error("Invalid bounds: {0}")]
    InvalidBounds(String),

    /// The configuration text could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Invalid publication filter control values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("Invalid year filter: {0}")]
    InvalidYear(String),

    #[error("Unknown sort order: {0}")]
    UnknownSort(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

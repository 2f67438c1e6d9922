//! Error types for Basic Fetch
//!
//! This module defines the error types for every component of the application.
//! Fetch failures never escape the list processor; they are turned into the
//! user-facing error state there. Configuration and I/O errors surface to the
//! binary and end the process.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while fetching and decoding the item list
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failure (DNS, connect, reset, TLS)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request did not complete within the configured timeout
    #[error("Request timed out after {}", humantime::format_duration(*.timeout))]
    Timeout { timeout: Duration },

    /// Server answered with a non-success status
    #[error("Server error: HTTP {status}")]
    ServerError { status: u16 },

    /// Body was not a JSON array of item records
    #[error("Malformed item list: {0}")]
    Decode(#[from] serde_json::Error),

    /// Endpoint could not be built from the configured base URL and path
    #[error("Invalid URL: {url} - {error}")]
    InvalidUrl { url: String, error: String },
}

impl FetchError {
    /// Transport, timeout and status failures
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            FetchError::Http(_) | FetchError::Timeout { .. } | FetchError::ServerError { .. }
        )
    }

    /// Malformed or schema-mismatched bodies
    pub fn is_decode(&self) -> bool {
        matches!(self, FetchError::Decode(_))
    }

    /// Whether trying the same request again can plausibly succeed
    pub fn is_recoverable(&self) -> bool {
        match self {
            FetchError::Http(_) | FetchError::Timeout { .. } => true,
            FetchError::ServerError { status } => *status >= 500 || *status == 429,
            FetchError::Decode(_) | FetchError::InvalidUrl { .. } => false,
        }
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Invalid configuration format
    #[error("Invalid configuration format: {0}")]
    InvalidFormat(#[from] toml::de::Error),

    /// Configuration could not be rendered as TOML
    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Invalid configuration value
    #[error("Invalid configuration value for {field}: {value}. {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    /// User config directory could not be determined
    #[error("Could not determine user config directory")]
    NoConfigDir,

    /// File I/O error while reading or writing configuration
    #[error("Configuration file I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Fetch error
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Generic I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Generic application error with context
    #[error("{message}")]
    Generic { message: String },
}

impl AppError {
    /// Create a generic application error with a message
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Fetch(e) if e.is_decode() => "decode",
            AppError::Fetch(_) => "network",
            AppError::Config(_) => "config",
            AppError::Io(_) => "io",
            AppError::Generic { .. } => "generic",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Fetch result type alias
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Configuration result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

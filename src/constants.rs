//! Application constants for Basic Fetch
//!
//! This module centralizes the constants used throughout the application,
//! organized by functional domain.

use std::time::Duration;

/// Environment variable names for configuration overrides
pub mod env {
    /// Overrides the base URL of the item endpoint
    pub const BASE_URL: &str = "BASIC_FETCH_BASE_URL";

    /// Overrides the request timeout (humantime format, e.g. "15s")
    pub const TIMEOUT: &str = "BASIC_FETCH_TIMEOUT";

    /// Overrides the configured log level
    pub const LOG_LEVEL: &str = "BASIC_FETCH_LOG";
}

/// Remote endpoint serving the item list
pub mod endpoint {
    /// Base URL of the hiring bucket
    pub const BASE_URL: &str = "https://fetch-hiring.s3.amazonaws.com/";

    /// Resource path of the item list, relative to the base URL
    pub const RESOURCE_PATH: &str = "hiring.json";
}

/// HTTP client configuration constants
pub mod http {
    use super::Duration;

    /// Default user agent for all HTTP requests
    pub const USER_AGENT: &str = concat!("Basic-Fetch/", env!("CARGO_PKG_VERSION"));

    /// Default HTTP request timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection establishment timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Connection pool idle timeout
    pub const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);
}

/// User-facing strings shown by the presentation layer
pub mod messages {
    /// Stored in `ListState::error_message` whenever a load fails
    pub const FAILURE_MESSAGE: &str = "Something went wrong.";

    /// Second line of the error view
    pub const FAILURE_HINT: &str = "Please check your internet connection.";

    /// Label of the retry affordance
    pub const RETRY_LABEL: &str = "Try Again";

    /// Shown when a load succeeded but nothing survived filtering
    pub const EMPTY_LIST: &str = "No items to display.";
}

/// Configuration file locations
pub mod config {
    /// Project-local configuration file name
    pub const LOCAL_FILE_NAME: &str = "basic-fetch.toml";

    /// Directory under the user config dir
    pub const APP_DIR_NAME: &str = "basic-fetch";

    /// File name inside the app config directory
    pub const FILE_NAME: &str = "config.toml";
}

/// Logging constants
pub mod logging {
    /// Default log level
    pub const DEFAULT_LOG_LEVEL: &str = "warn";

    /// Accepted log levels, lowest to highest verbosity
    pub const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
}

/// Terminal presentation constants
pub mod ui {
    use super::Duration;

    /// Spinner tick interval while a load is in flight
    pub const SPINNER_TICK: Duration = Duration::from_millis(120);

    /// Spinner frames
    pub const SPINNER_FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];
}

// Re-export commonly used constants for convenience
pub use endpoint::{BASE_URL, RESOURCE_PATH};
pub use http::USER_AGENT;
pub use messages::{FAILURE_HINT, FAILURE_MESSAGE};

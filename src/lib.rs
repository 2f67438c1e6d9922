//! Basic Fetch Library
//!
//! Fetches the hiring item list, drops records without a usable name, sorts
//! the rest by list and name, and publishes the result as observable state
//! for a presentation layer, with a retry path for failed loads.

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod prelude;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};

#[cfg(test)]
mod tests {
    use super::*;
    use constants::*;

    #[test]
    fn test_constants_accessible() {
        assert_eq!(RESOURCE_PATH, "hiring.json");
        assert!(BASE_URL.ends_with('/'));
        assert!(USER_AGENT.starts_with("Basic-Fetch/"));
    }

    #[test]
    fn test_error_types() {
        let fetch_error = errors::FetchError::ServerError { status: 502 };
        let app_error = AppError::Fetch(fetch_error);

        assert_eq!(app_error.category(), "network");
    }
}

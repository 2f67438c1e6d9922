//! Prelude module for Basic Fetch Library
//!
//! Re-exports the items most integrations need, so a single
//! `use basic_fetch::prelude::*;` is enough.
//!
//! # Usage
//!
//! ```rust,no_run
//! use basic_fetch::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let processor = ListProcessor::new(FetchClient::new()?);
//!     if let LoadOutcome::Failed(_) = processor.activate().await {
//!         processor.retry().await;
//!     }
//!     println!("{} items", processor.snapshot().items.len());
//!     Ok(())
//! }
//! ```

// Core result types
pub use crate::errors::{AppError, FetchError, Result};

pub use crate::app::{
    ClientConfig, FetchClient, Item, ItemSource, ListProcessor, ListState, LoadOutcome, LoadPhase,
    LoadTrigger,
};
pub use crate::config::AppConfig;

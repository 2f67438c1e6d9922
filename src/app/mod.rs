//! Core application logic for Basic Fetch
//!
//! This module contains the fetch client, the data models and the list
//! processor that turns raw records into display-ready state.
//!
//! # Examples
//!
//! ```rust,no_run
//! use basic_fetch::app::{FetchClient, ListProcessor};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let processor = ListProcessor::new(FetchClient::new()?);
//! processor.activate().await;
//!
//! let state = processor.snapshot();
//! match &state.error_message {
//!     Some(message) => eprintln!("{}", message),
//!     None => {
//!         for item in &state.items {
//!             println!("{} {}", item.list_id, item.display_name());
//!         }
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod models;
pub mod processor;

// Re-export main public API
pub use client::{ClientConfig, FetchClient, ItemSource};
pub use models::{Item, ListState, LoadPhase, LoadTrigger};
pub use processor::{is_displayable, prepare_items, sort_items, ListProcessor, LoadOutcome};

//! Data models for Basic Fetch
//!
//! This module defines the wire record (`Item`) and the view-model snapshot
//! (`ListState`) that the presentation layer observes.

use serde::{Deserialize, Serialize};

/// One record of the remote item list
///
/// `name` is optional on the wire: the payload may omit it, send `null`, or
/// send an empty string. Only items with a non-blank name survive processing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Group identifier, not unique across items
    #[serde(rename = "listId")]
    pub list_id: i64,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
}

impl Item {
    /// Create an item with a name
    pub fn new(list_id: i64, name: impl Into<String>) -> Self {
        Self {
            list_id,
            name: Some(name.into()),
        }
    }

    /// Create an item without a name
    pub fn unnamed(list_id: i64) -> Self {
        Self {
            list_id,
            name: None,
        }
    }

    /// Name as shown to the user, empty when absent
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}

/// Where the list is in its load lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPhase {
    /// Nothing has been requested yet
    #[default]
    Idle,
    /// A fetch is in flight
    Loading,
    /// The last fetch succeeded
    Loaded,
    /// The last fetch failed
    Failed,
}

impl std::fmt::Display for LoadPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            LoadPhase::Idle => "idle",
            LoadPhase::Loading => "loading",
            LoadPhase::Loaded => "loaded",
            LoadPhase::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// What caused a load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadTrigger {
    /// First load when the screen is activated
    Initial,
    /// User asked to try again
    Retry,
}

impl std::fmt::Display for LoadTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadTrigger::Initial => f.write_str("initial"),
            LoadTrigger::Retry => f.write_str("retry"),
        }
    }
}

/// View-model snapshot consumed by the presentation layer
///
/// Mutated only by [`ListProcessor`](crate::app::ListProcessor). When
/// `error_message` is set the error view supersedes the list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ListState {
    /// Items in display order
    pub items: Vec<Item>,
    /// User-facing error, set only in the failed phase
    pub error_message: Option<String>,
    /// Current lifecycle phase
    pub phase: LoadPhase,
}

impl ListState {
    /// True only while a fetch is in flight
    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    /// True when the error view should be shown
    pub fn is_failed(&self) -> bool {
        self.error_message.is_some()
    }
}

//! Text rendering of the list state
//!
//! The error view supersedes the list: if `error_message` is set nothing
//! else is printed, regardless of what `items` holds.

use std::io::{self, Write};

use crate::app::{Item, ListState};
use crate::constants::messages;

/// Which view the state routes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View<'a> {
    /// A load is in flight
    Loading,
    /// Last load failed
    Error { message: &'a str },
    /// Loaded but nothing to show, or never loaded
    Empty,
    /// Items in display order
    Items(&'a [Item]),
}

impl<'a> View<'a> {
    /// Route a state snapshot to a view
    pub fn of(state: &'a ListState) -> Self {
        if state.is_loading() {
            View::Loading
        } else if let Some(message) = state.error_message.as_deref() {
            View::Error { message }
        } else if state.items.is_empty() {
            View::Empty
        } else {
            View::Items(&state.items)
        }
    }
}

/// Write one item card
pub fn write_card<W: Write>(out: &mut W, item: &Item) -> io::Result<()> {
    writeln!(out, "List ID: {}", item.list_id)?;
    writeln!(out, "Name: {}", item.display_name())
}

/// Write the view for `state` as text cards separated by blank lines
pub fn write_state<W: Write>(out: &mut W, state: &ListState) -> io::Result<()> {
    match View::of(state) {
        View::Loading => writeln!(out, "Loading..."),
        View::Error { message } => {
            writeln!(out, "{}", message)?;
            writeln!(out, "{}", messages::FAILURE_HINT)
        }
        View::Empty => writeln!(out, "{}", messages::EMPTY_LIST),
        View::Items(items) => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    writeln!(out)?;
                }
                write_card(out, item)?;
            }
            Ok(())
        }
    }
}

/// Write the items of `state` as a JSON array
pub fn write_json<W: Write>(out: &mut W, state: &ListState) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, &state.items)?;
    writeln!(out)
}

//! Command-line interface components
//!
//! This module contains CLI-specific code for Basic Fetch, including argument
//! parsing, command handling and the text presentation of the list state.

pub mod args;
pub mod commands;
pub mod render;

pub use args::{Cli, Commands, ConfigAction, ConfigArgs, GlobalArgs, ListArgs};
pub use commands::{handle_config, handle_list, should_auto_retry};
pub use render::{write_json, write_state, View};

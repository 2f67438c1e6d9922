//! Command-line argument parsing for Basic Fetch
//!
//! This module defines the CLI structure using clap derive macros.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::constants::logging::DEFAULT_LOG_LEVEL;

/// Basic Fetch - show the hiring item list
#[derive(Parser, Debug)]
#[command(
    name = "basic_fetch",
    version,
    about = "Fetch, filter and sort the hiring item list",
    long_about = "Fetches the hiring item list, drops items without a name, sorts the rest by list id and name,
and prints them. Failed loads can be retried interactively or automatically."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all subcommands
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long, global = true)]
    pub very_verbose: bool,

    /// Quiet mode - suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch and display the item list
    List(ListArgs),

    /// Inspect or create the configuration file
    Config(ConfigArgs),
}

/// Arguments for the list command
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Retry automatically up to N times after a failed load
    #[arg(short, long, default_value_t = 0, value_name = "N")]
    pub retries: u32,

    /// Never ask whether to try again
    #[arg(long)]
    pub no_prompt: bool,

    /// Print the items as JSON instead of cards
    #[arg(long)]
    pub json: bool,

    /// Override the endpoint base URL
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Override the request timeout (e.g. "5s", "500ms")
    #[arg(long, value_name = "DURATION", value_parser = humantime::parse_duration)]
    pub timeout: Option<Duration>,
}

/// Arguments for configuration management
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Log level requested by the verbosity flags, if any
    pub fn log_level(&self) -> Option<&'static str> {
        if self.global.very_verbose {
            Some("debug")
        } else if self.global.verbose {
            Some("info")
        } else if self.global.quiet {
            Some("error")
        } else {
            None
        }
    }

    /// Level used while the configuration is still being discovered
    ///
    /// Verbosity flags win over the `BASIC_FETCH_LOG` value passed in as
    /// `env_level`, which wins over the built-in default.
    pub fn startup_log_level(&self, env_level: Option<&str>) -> String {
        self.log_level()
            .map(str::to_string)
            .or_else(|| env_level.map(|level| level.trim().to_ascii_lowercase()))
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
    }
}

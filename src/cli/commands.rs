//! Command handlers for Basic Fetch CLI
//!
//! This module connects CLI arguments to the list processor and acts as the
//! presentation layer: spinner while loading, cards or JSON when loaded, the
//! error view plus a retry affordance when a load fails.

use std::io::{self, BufRead, Write};

use atty::Stream;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use crate::app::{ClientConfig, FetchClient, ItemSource, ListProcessor, LoadOutcome, LoadTrigger};
use crate::cli::render::{write_json, write_state};
use crate::cli::{ConfigAction, ConfigArgs, ListArgs};
use crate::config::AppConfig;
use crate::constants::{messages, ui};
use crate::errors::{AppError, Result};

/// Handle the list command
///
/// Runs the initial load, then keeps offering retries while the state is
/// failed. The automatic `--retries` budget is only spent on recoverable
/// failures; after that the interactive prompt is offered when stdin is a
/// terminal.
pub async fn handle_list(args: ListArgs, config: &AppConfig, quiet: bool) -> Result<()> {
    let client = FetchClient::with_config(client_config_for(&args, config))?;
    info!("Loading items from {}", client.endpoint());

    let processor = ListProcessor::new(client);
    let interactive = !args.no_prompt && atty::is(Stream::Stdin) && atty::is(Stream::Stdout);
    let show_spinner = !quiet && atty::is(Stream::Stderr);

    let mut outcome = run_load(&processor, LoadTrigger::Initial, show_spinner).await;
    let mut attempts: u32 = 1;
    let mut retries_left = args.retries;

    while processor.snapshot().is_failed() {
        if let LoadOutcome::Failed(e) = &outcome {
            debug!("Attempt {} failed: {}", attempts, e);
        }
        write_state(&mut io::stderr().lock(), &processor.snapshot())?;

        let retry = if should_auto_retry(&outcome, retries_left) {
            retries_left -= 1;
            info!("Retrying automatically ({} left)", retries_left);
            true
        } else if interactive {
            prompt_retry()?
        } else {
            false
        };

        if !retry {
            return Err(AppError::generic(format!(
                "Item list could not be loaded after {} attempt(s)",
                attempts
            )));
        }

        attempts += 1;
        outcome = run_load(&processor, LoadTrigger::Retry, show_spinner).await;
    }

    if let LoadOutcome::Loaded {
        retained,
        discarded,
    } = outcome
    {
        info!("Displaying {} items ({} without a name hidden)", retained, discarded);
    }

    let state = processor.snapshot();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        write_json(&mut out, &state)?;
    } else {
        write_state(&mut out, &state)?;
    }
    out.flush()?;
    Ok(())
}

/// Handle the config command
pub async fn handle_config(args: ConfigArgs, config: &AppConfig) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            print!("{}", config.to_toml_string()?);
        }
        ConfigAction::Init { force } => {
            let path = AppConfig::initialize(force).await?;
            println!("Configuration file: {}", path.display());
        }
    }
    Ok(())
}

/// Runtime client configuration with CLI overrides applied
pub fn client_config_for(args: &ListArgs, config: &AppConfig) -> ClientConfig {
    let mut client_config = config.to_runtime_config();
    if let Some(base_url) = &args.base_url {
        client_config.base_url = base_url.clone();
    }
    if let Some(timeout) = args.timeout {
        client_config.request_timeout = timeout;
    }
    client_config
}

/// Whether a failed load should be retried without asking
///
/// Decode errors, invalid URLs and 4xx statuses other than 429 would fail
/// the same way again, so they never consume the budget.
pub fn should_auto_retry(outcome: &LoadOutcome, retries_left: u32) -> bool {
    match outcome {
        LoadOutcome::Failed(e) if retries_left > 0 => {
            if !e.is_recoverable() {
                info!("Not retrying automatically: {}", e);
            }
            e.is_recoverable()
        }
        _ => false,
    }
}

/// Interpret an answer to the retry prompt; empty means yes
pub fn parse_retry_answer(answer: &str) -> bool {
    matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "" | "y" | "yes"
    )
}

async fn run_load<S: ItemSource>(
    processor: &ListProcessor<S>,
    trigger: LoadTrigger,
    show_spinner: bool,
) -> LoadOutcome {
    let spinner = show_spinner.then(|| loading_spinner(trigger));
    let outcome = processor.load(trigger).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    outcome
}

fn loading_spinner(trigger: LoadTrigger) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    match ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        Ok(style) => spinner.set_style(style.tick_strings(&ui::SPINNER_FRAMES)),
        Err(e) => warn!("Invalid spinner template: {}", e),
    }
    spinner.set_message(match trigger {
        LoadTrigger::Initial => "Loading items...",
        LoadTrigger::Retry => "Trying again...",
    });
    spinner.enable_steady_tick(ui::SPINNER_TICK);
    spinner
}

fn prompt_retry() -> Result<bool> {
    print!("{}? [Y/n] ", messages::RETRY_LABEL);
    io::stdout().flush()?;

    let mut answer = String::new();
    let read = io::stdin().lock().read_line(&mut answer)?;
    Ok(read > 0 && parse_retry_answer(&answer))
}

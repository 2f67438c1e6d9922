//! Basic Fetch CLI application
//!
//! Fetches the hiring item list and prints it, with retry on failure.

use std::process;

use tracing::instrument::WithSubscriber;
use tracing::{error, info, Subscriber};
use tracing_subscriber::{fmt, EnvFilter};

use basic_fetch::cli::{handle_config, handle_list, Cli, Commands};
use basic_fetch::config::AppConfig;
use basic_fetch::constants::env;
use basic_fetch::errors::Result;

#[tokio::main]
async fn main() {
    let result = run().await;

    if let Err(e) = result {
        error!(category = e.category(), "{}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Main application logic
async fn run() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenv::dotenv().ok();

    let cli = Cli::parse_args();

    // Config discovery logs through a subscriber built from the flags alone
    let startup_level = cli.startup_log_level(std::env::var(env::LOG_LEVEL).ok().as_deref());
    let config = AppConfig::load(cli.global.config.clone())
        .with_subscriber(build_subscriber(&startup_level, false, cli.global.very_verbose))
        .await?;

    init_logging(&cli, &config);

    info!("Basic Fetch v{} starting", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::List(args) => {
            info!("Executing list command");
            handle_list(args, &config, cli.global.quiet).await
        }
        Commands::Config(args) => {
            info!("Executing config command");
            handle_config(args, &config).await
        }
    }
}

/// Initialize logging from CLI verbosity, falling back to the configured level
fn init_logging(cli: &Cli, config: &AppConfig) {
    let log_level = cli
        .log_level()
        .map(str::to_string)
        .unwrap_or_else(|| config.logging.level.to_ascii_lowercase());

    let subscriber = build_subscriber(
        &log_level,
        config.logging.colored_output,
        cli.global.very_verbose,
    );
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install logger: {}", e);
    }

    if cli.global.very_verbose {
        info!("Very verbose logging enabled");
    } else if cli.global.verbose {
        info!("Verbose logging enabled");
    }
}

fn build_subscriber(
    log_level: &str,
    ansi: bool,
    show_level: bool,
) -> impl Subscriber + Send + Sync + 'static {
    let mut filter = EnvFilter::from_default_env();
    match format!("basic_fetch={}", log_level).parse() {
        Ok(directive) => filter = filter.add_directive(directive),
        Err(e) => eprintln!("Ignoring invalid log level '{}': {}", log_level, e),
    }

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(ansi)
        .with_level(show_level)
        .with_writer(std::io::stderr)
        .finish()
}

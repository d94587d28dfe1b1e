mod extract;
mod scrape;
mod sink;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vitae_core::{AppConfig, ConfigError};

#[derive(Debug, Parser)]
#[command(name = "vitae-cli")]
#[command(about = "Extract structured professional profiles")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch and extract every target profile, one JSON line per profile
    Scrape {
        /// Username or profile URL to scrape; repeatable. Overrides the targets file.
        #[arg(long = "profile")]
        profiles: Vec<String>,

        /// Output file; defaults to VITAE_OUTPUT_PATH
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Run extraction over saved payload files and print the record
    Extract {
        #[arg(long)]
        username: String,

        /// Saved contact-info page HTML
        #[arg(long)]
        contact: PathBuf,

        /// Saved profile API response
        #[arg(long)]
        profile_api: PathBuf,

        /// Saved profile cards API response
        #[arg(long)]
        cards: PathBuf,
    },
}

/// Filter used when `RUST_LOG` is unset and no configuration is loaded.
const DEFAULT_LOG_LEVEL: &str = "info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run(cli.command, vitae_core::load_app_config).await
}

/// Dispatches `command`. Only `scrape` loads configuration; `extract` works
/// offline and runs even when the environment is misconfigured.
async fn run<F>(command: Commands, load_config: F) -> anyhow::Result<()>
where
    F: FnOnce() -> Result<AppConfig, ConfigError>,
{
    match command {
        Commands::Scrape { profiles, output } => {
            let config = load_config().context("failed to load configuration")?;
            init_tracing(&config.log_level)?;
            tracing::debug!(env = %config.env, "configuration loaded");
            scrape::run(&config, &profiles, output.as_deref()).await
        }
        Commands::Extract {
            username,
            contact,
            profile_api,
            cards,
        } => {
            init_tracing(DEFAULT_LOG_LEVEL)?;
            extract::run(&username, &contact, &profile_api, &cards)
        }
    }
}

fn init_tracing(fallback_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(fallback_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}

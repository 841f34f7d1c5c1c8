//! GameHub entry point.

mod cli;
mod config;
mod runtime;

use clap::Parser;
use gamehub_hub_settings::{FolderSelector, PreferenceStore};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), command = ?cli.command, "starting GameHub");

    // Load configuration.
    let config = match config::HubConfig::load() {
        Ok(c) => {
            tracing::debug!(runtime = %c.runtime_command, "configuration loaded");
            c
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to load config, using defaults");
            config::HubConfig::default()
        }
    };

    let selector = FolderSelector::new(PreferenceStore::open_default()?);

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(cli::run(cli.command, config, selector))
}

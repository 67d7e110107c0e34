//! Terminal user-registration form.

use anyhow::Context;
use clap::Parser;
use log::{debug, info};
use roster_config::{LayeredConfigOptions, RosterConfig};
use roster_tui::TuiConfig;
use std::path::PathBuf;

/// Command-line options for the registration form.
#[derive(Parser)]
#[command(name = "roster", version)]
struct Cli {
    /// Optional path to a roster.json5 config file applied over the discovered layers
    #[arg(long)]
    config: Option<PathBuf>,
    /// Directory relative image paths are resolved against
    #[arg(long)]
    image_dir: Option<PathBuf>,
}

/// Entry point for the Roster TUI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = env_logger::builder()
        .format_timestamp_millis()
        .parse_default_env()
        .try_init();

    let cli = Cli::parse();
    info!(
        "starting roster (config_set={}, image_dir_set={})",
        cli.config.is_some(),
        cli.image_dir.is_some()
    );

    let cwd = std::env::current_dir().context("cwd")?;
    info!("loading layered config from cwd: {}", cwd.display());
    let mut options = LayeredConfigOptions::new(&cwd);
    if let Some(path) = cli.config.as_ref() {
        options = options.with_runtime_path(path);
    }
    let layered =
        RosterConfig::load_layered_with_options(options).context("failed to load config")?;
    debug!("layered config loaded (layers={})", layered.layers.len());

    roster_tui::run(TuiConfig {
        roster: layered.config,
        image_dir: cli.image_dir,
    })
    .await
}

use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use traymon::config::{self, load_config, load_config_from_path};
use traymon::{logging, ui};

#[derive(Parser)]
#[command(
    name = "traymon",
    version,
    about = "System tray monitor for CPU, memory, top processes and temperatures"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Refresh rate in milliseconds
    #[arg(long)]
    refresh_rate: Option<u64>,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = load_config_for_cli(&cli);
    logging::init(&config.general)?;

    // One worker drives the tick timer; the GUI loop owns the main thread.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("traymon-events")
        .enable_time()
        .build()?;
    let _guard = runtime.enter();

    ui::run(config).map_err(|e| eyre!("popup window failed: {e}"))?;
    tracing::info!("exiting");
    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> config::Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(rate) = cli.refresh_rate {
        config.general.refresh_rate_ms = rate.max(100);
    }

    config
}

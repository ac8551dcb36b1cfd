mod action;
mod app;
mod app_state;
mod component;
mod components;
mod tabs;
mod theme;
mod widgets;

use anyhow::{Context, Result};
use board_core::config::Config;
use tracing_subscriber::EnvFilter;

use crate::app::App;

#[tokio::main]
async fn main() -> Result<()> {
    // Log to a file; stdout belongs to the TUI.
    let log_dir = board_core::platform::data_dir();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("creating {}", log_dir.display()))?;
    let log_path = log_dir.join("bboard.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("opening {}", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("debug,hyper_util=warn,reqwest=warn,hyper=warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .init();

    eprintln!("logging to {}", log_path.display());
    tracing::info!("bboard starting");

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("config load failed, using defaults: {e:#}");
            Config::default()
        }
    };

    App::new(config).run().await
}

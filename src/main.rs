use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

pub mod config;
pub mod error;
pub mod http_probe;
pub mod notify;
pub mod scheduler;
pub mod state;

use config::load_config;
use error::ConfigError;
use http_probe::prelude::*;
use notify::TelegramNotifier;
use scheduler::{Monitor, signal::shutdown_channel};

/// Watches a list of URLs and reports on Telegram when one goes down or comes back up.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the YAML (or JSON) file with `urls` and `interval`.
    #[arg(long, env = "CONFIG_FILE", default_value = "config.yml")]
    config: PathBuf,

    /// Env file with TOKEN and CHAT_ID. Defaults to `.env` when present.
    #[arg(long, env = "ENV_FILE")]
    env_file: Option<PathBuf>,
}

async fn start(cli: Cli) -> Result<(), ConfigError> {
    let app = load_config(&cli.config, cli.env_file.as_deref())?;

    let prober = HttpProber::new(
        app.monitor.timeout(),
        app.monitor.accepted_status_codes.clone(),
    )?;
    let notifier = TelegramNotifier::new(&app.telegram_api, &app.credentials)?;
    let interval = app.monitor.interval();

    let mut monitor = Monitor::new(app.monitor.urls, interval, prober, notifier);
    monitor.run(shutdown_channel()).await;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match start(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("statuswatch: {e}");
            ExitCode::FAILURE
        }
    }
}

#![forbid(unsafe_code)]

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level as TraceLevel};
use tracing_subscriber::FmtSubscriber;

use email_settings::config::AppConfig;
use email_settings::gateway::FailureMode;
use email_settings::gui::run_gui;

#[derive(Parser, Debug)]
#[command(name = "email-settings", version, about = "Email notification settings form")]
struct Cli {
    /// Config file (defaults to <config dir>/email-settings/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level: trace, debug, info, warn or error (overrides LOG_LEVEL)
    #[arg(long)]
    log_level: Option<String>,

    /// Make the simulated backend fail fetches, saves or both
    #[arg(long, value_enum)]
    fail: Option<FailureMode>,
}

fn parse_level(name: &str) -> TraceLevel {
    match name.to_lowercase().as_str() {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(fail) = cli.fail {
        config.gateway.failure = fail;
    }

    // CLI flag, then LOG_LEVEL, then the config file
    let level_name = cli
        .log_level
        .clone()
        .or_else(|| std::env::var("LOG_LEVEL").ok())
        .unwrap_or_else(|| config.log_level.clone());

    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_level(&level_name))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!(config = ?config, "Starting email settings");
    run_gui(config)
}

mod commands;
mod date_input;
mod render;
mod shell;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use daybook_core::{DaybookConfig, DaybookResult, EventStore};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::shell::Session;

#[derive(Parser)]
#[command(name = "daybook")]
#[command(about = "Keep a day-by-day list of events in memory for one session")]
struct Cli {
    /// Log store activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Read commands from stdin (the default)
    Shell,
    /// Execute a file of shell commands
    Run { script: PathBuf },
    /// Show the config path and effective settings
    Config {
        /// Write a commented template if no config file exists yet
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let loaded = DaybookConfig::load();

    match cli.command.unwrap_or(Commands::Shell) {
        // Reports a broken config itself, after showing where it lives
        Commands::Config { init } => commands::config::run(loaded, init),
        Commands::Shell => commands::shell::run(new_session(&load_config(loaded)?)?),
        Commands::Run { script } => {
            commands::run::run(new_session(&load_config(loaded)?)?, &script)
        }
    }
}

fn load_config(loaded: DaybookResult<DaybookConfig>) -> Result<DaybookConfig> {
    loaded.context("Failed to load config (run `daybook config` to see its path)")
}

/// Filter used when `RUST_LOG` is unset.
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "daybook=debug,daybook_core=debug"
    } else {
        "daybook=warn,daybook_core=warn"
    }
}

fn init_tracing(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose))),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn new_session(config: &DaybookConfig) -> Result<Session> {
    let tz = match config.tz()? {
        Some(tz) => Some(tz),
        None => system_timezone(),
    };

    Ok(Session::new(EventStore::new(), tz, config))
}

/// The system zone, or None (floating times) when it can't be determined.
fn system_timezone() -> Option<Tz> {
    let name = match iana_time_zone::get_timezone() {
        Ok(name) => name,
        Err(e) => {
            warn!("Could not detect system timezone, using floating times: {}", e);
            return None;
        }
    };

    match name.parse::<Tz>() {
        Ok(tz) => Some(tz),
        Err(_) => {
            warn!("Unknown system timezone '{}', using floating times", name);
            None
        }
    }
}

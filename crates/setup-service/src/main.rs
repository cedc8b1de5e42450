//! `setupctl`: inspect and plan changes to event-sourced AV setups.
//!
//! # Usage
//!
//! ```text
//! setupctl [--config <PATH>] [--history-dir <DIR>] <COMMAND>
//!
//! Commands:
//!   snapshot <SETUP> [--index <N>]   Setup after its first N events (default: all)
//!   replay   <SETUP>                 Current setup and event count
//!   plan     <SETUP> <DESIRED.json> --user-uuid <ID> --user-email <EMAIL>
//!                                    Events that would bring SETUP to DESIRED
//!   init-config                      Write the default config file
//! ```
//!
//! Results go to stdout as JSON; logs go to stderr.  `RUST_LOG` overrides the
//! configured log level.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use setup_core::{encode_history, AuditUser, SetupUuid};
use setup_service::application::draft::SetupDraft;
use setup_service::application::setup_service::SetupService;
use setup_service::infrastructure::storage::config::{
    config_file_path, load_config_from, save_config_to, AppConfig,
};
use setup_service::infrastructure::storage::history::JsonFileHistory;

// ── CLI argument definitions ──────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(
    name = "setupctl",
    about = "Inspect and plan changes to event-sourced audio/video setups",
    version
)]
struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, global = true, env = "SETUPCTL_CONFIG")]
    config: Option<PathBuf>,

    /// Directory of `<setup-uuid>.json` histories; overrides `history.directory`.
    #[arg(long, global = true, env = "SETUPCTL_HISTORY_DIR")]
    history_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the setup as it was after its first N events.
    Snapshot {
        setup: String,
        /// Number of events to replay; defaults to the whole history.
        #[arg(long)]
        index: Option<usize>,
    },

    /// Print the current setup and the number of stored events.
    Replay { setup: String },

    /// Print the events that would turn SETUP into the desired draft.
    Plan {
        setup: String,
        /// JSON file with the desired setup draft.
        desired: PathBuf,
        #[arg(long, env = "SETUPCTL_USER_UUID")]
        user_uuid: String,
        #[arg(long, env = "SETUPCTL_USER_EMAIL")]
        user_email: String,
    },

    /// Write the default configuration to the config file.
    InitConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplayOutput<'a> {
    setup: &'a setup_core::Setup,
    event_count: usize,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => config_file_path().context("locating config file")?,
    };
    let config = load_config_from(&config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;

    // Level is overridden by `RUST_LOG`.  Logs go to stderr to keep stdout JSON clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.service.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let history_dir = cli
        .history_dir
        .clone()
        .unwrap_or_else(|| config.history.directory.clone());
    let history = JsonFileHistory::new(history_dir);
    info!(
        config = %config_path.display(),
        history = %history.directory().display(),
        "setupctl starting"
    );

    let service = SetupService::new(history);

    match cli.command {
        Command::Snapshot { setup, index } => {
            let setup = SetupUuid::new(setup);
            let snapshot = match index {
                Some(index) => service.snapshot(&setup, index)?,
                None => service.replay(&setup)?.state,
            };
            print_json(&snapshot, &config)?;
        }
        Command::Replay { setup } => {
            let state = service.replay(&SetupUuid::new(setup))?;
            print_json(
                &ReplayOutput {
                    setup: &state.state,
                    event_count: state.events.len(),
                },
                &config,
            )?;
        }
        Command::Plan {
            setup,
            desired,
            user_uuid,
            user_email,
        } => {
            let target = read_draft(&desired)?
                .into_setup()
                .with_context(|| format!("validating {}", desired.display()))?;
            let planned = service.plan_update(
                &SetupUuid::new(setup),
                AuditUser::new(user_uuid, user_email),
                target,
            )?;
            println!("{}", encode_history(&planned)?);
        }
        Command::InitConfig => {
            save_config_to(&config_path, &AppConfig::default())
                .with_context(|| format!("writing {}", config_path.display()))?;
            info!(path = %config_path.display(), "default config written");
        }
    }

    Ok(())
}

fn read_draft(path: &Path) -> anyhow::Result<SetupDraft> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

fn print_json<T: Serialize>(value: &T, config: &AppConfig) -> anyhow::Result<()> {
    let json = if config.history.pretty_output {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}

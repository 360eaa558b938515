//! Mailroom CLI
//!
//! A command-line interface for the Mailroom messaging API.

mod commands;
mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{ApiConfig, Overrides};

/// Mailroom CLI — manage draft messages and their attachments.
#[derive(Parser, Debug)]
#[command(name = "mailroom", version, about)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(
        long,
        env = "MAILROOM_CONFIG",
        default_value = "mailroom.toml",
        global = true
    )]
    config: PathBuf,

    /// Messaging API endpoint URL.
    #[arg(long, env = "MAILROOM_ENDPOINT", global = true)]
    endpoint: Option<String>,

    /// User identifier for authentication.
    #[arg(long, env = "MAILROOM_USER_ID", global = true)]
    user_id: Option<String>,

    /// Access token for authentication.
    #[arg(long, env = "MAILROOM_ACCESS_TOKEN", global = true, hide_env_values = true)]
    access_token: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, env = "MAILROOM_TIMEOUT_SECS", global = true)]
    timeout_secs: Option<u64>,

    /// Output format.
    #[arg(long, default_value = "text", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check API health.
    Health,
    /// Read messages.
    Message(commands::message::MessageArgs),
    /// Manage draft attachments.
    Draft(commands::draft::DraftArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let overrides = Overrides {
        endpoint: cli.endpoint,
        user_id: cli.user_id,
        access_token: cli.access_token,
        timeout_seconds: cli.timeout_secs,
    };
    let config = ApiConfig::load(&cli.config, overrides)?;
    tracing::debug!(?config, "configuration loaded");

    let client = config.build_client()?;

    match cli.command {
        Command::Health => commands::health::run(&client).await,
        Command::Message(args) => commands::message::run(&client, &args, &cli.format).await,
        Command::Draft(args) => commands::draft::run(&client, &args, &cli.format).await,
    }
}

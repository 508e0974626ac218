//! CLI entry point for the schedcal tool.

use anyhow::Result;
use clap::Parser;
use schedcal_core::{ApiClient, CredentialStore};
use tracing::debug;

mod cli;
mod commands;

use cli::{Args, Command};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    let api = match args.endpoint.as_deref() {
        Some(endpoint) => ApiClient::new(endpoint)?,
        None => ApiClient::from_env()?,
    };
    debug!(endpoint = %api.endpoint(), "API client constructed");

    let store = CredentialStore::open_default()?;

    match args.command {
        Command::Login { username, password } => {
            commands::run_login_command(api, store, &username, password).await
        }
        Command::Logout => commands::run_logout_command(&store),
        Command::Profile => commands::run_profile_command(api, store).await,
        Command::Export {
            config,
            crns,
            courses,
            output,
            preview,
        } => {
            commands::run_export_command(api, store, &config, &crns, &courses, output, preview)
                .await
        }
    }
}

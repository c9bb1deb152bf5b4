//! SmartFinance CLI - Automatic spending dashboard
//!
//! Usage:
//!   smartfin analyze --file CSV     Show statistics, warnings, forecast and summary
//!   smartfin check --file CSV       Validate a transaction table
//!   smartfin show --file CSV        Print table rows
//!   smartfin config                 Show the active dashboard config

mod cli;
mod commands;
mod config;
mod theme;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr).compact())
        .init();

    let (mut dashboard, source) = config::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Analyze {
            file,
            theme,
            format,
        } => {
            if let Some(theme) = theme {
                dashboard.theme = theme;
            }
            commands::cmd_analyze(&file, cli.delimiter, &dashboard, format)
        }
        Commands::Check { file } => commands::cmd_check(&file, cli.delimiter),
        Commands::Show { file, limit } => {
            commands::cmd_show(&file, cli.delimiter, limit, &dashboard)
        }
        Commands::Config => commands::cmd_config(&dashboard, &source),
    }
}

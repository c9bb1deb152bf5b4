//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::theme::Theme;

/// SmartFinance - Automatic spending analysis
#[derive(Parser)]
#[command(name = "smartfin")]
#[command(about = "Spending dashboard: category totals, budget warnings and next-month forecast", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Dashboard config file (defaults to ~/.config/smartfin/dashboard.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Field delimiter of the transaction table
    #[arg(short, long, default_value = ",", global = true)]
    pub delimiter: char,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a transaction table and show the dashboard
    Analyze {
        /// CSV file with tanggal, kategori, jumlah columns ("-" for stdin)
        #[arg(short, long)]
        file: PathBuf,

        /// Dashboard theme (overrides the config file)
        #[arg(short, long, value_enum)]
        theme: Option<Theme>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Validate a transaction table without analyzing it
    Check {
        /// CSV file to validate ("-" for stdin)
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Print the rows of a transaction table
    Show {
        /// CSV file to print ("-" for stdin)
        #[arg(short, long)]
        file: PathBuf,

        /// Number of rows to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show the active dashboard configuration
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable dashboard
    Text,
    /// Full analysis report as JSON
    Json,
}

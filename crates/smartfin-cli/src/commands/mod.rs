//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `analyze` - Full dashboard (statistics, warnings, forecast, summary)
//! - `status` - Active configuration display
//! - `table` - Table validation and row listing (check, show)

pub mod analyze;
pub mod status;
pub mod table;

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use smartfin_core::{parse_csv_with_delimiter, TransactionSet};

// Re-export command functions for main.rs
pub use analyze::*;
pub use status::*;
pub use table::*;

/// Read and validate a transaction table from a file, or stdin for "-"
pub fn read_table(file: &Path, delimiter: char) -> Result<TransactionSet> {
    let delimiter = delimiter_byte(delimiter)?;

    let reader: Box<dyn Read> = if file == Path::new("-") {
        Box::new(io::stdin().lock())
    } else {
        Box::new(
            File::open(file)
                .with_context(|| format!("Failed to open file: {}", file.display()))?,
        )
    };

    parse_csv_with_delimiter(reader, delimiter)
        .with_context(|| format!("Failed to read transactions from {}", file.display()))
}

fn delimiter_byte(delimiter: char) -> Result<u8> {
    if delimiter.is_ascii() {
        Ok(delimiter as u8)
    } else {
        anyhow::bail!("Delimiter must be a single ASCII character, got '{}'", delimiter)
    }
}

/// Format an amount with thousands separators and no decimals,
/// e.g. `Rp 1,250,000`
pub fn format_money(amount: f64, currency: &str) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if currency.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{} {}", sign, currency, grouped)
    }
}

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

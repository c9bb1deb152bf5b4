//! Table command implementations (check, show)

use std::path::Path;

use anyhow::Result;
use chrono::NaiveDate;
use smartfin_core::{Error, TransactionSet};

use super::{format_money, read_table, truncate};
use crate::config::DashboardConfig;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn cmd_check(file: &Path, delimiter: char) -> Result<()> {
    let set = read_table(file, delimiter)?;
    let Some((first, last)) = set.date_range() else {
        return Err(Error::EmptyData.into());
    };

    println!();
    println!("✅ {} is a valid transaction table", file.display());
    println!("   ─────────────────────────────────────────────────────────────");
    print!("{}", render_check(&set, first, last));

    Ok(())
}

fn render_check(set: &TransactionSet, first: NaiveDate, last: NaiveDate) -> String {
    let categories = set.categories();
    let mut out = String::new();
    out.push_str(&format!("   Rows: {}\n", set.len()));
    out.push_str(&format!(
        "   Dates: {} to {}\n",
        first.format(DATE_FORMAT),
        last.format(DATE_FORMAT)
    ));
    out.push_str(&format!(
        "   Categories ({}): {}\n",
        categories.len(),
        categories.join(", ")
    ));
    if set.refund_count() > 0 {
        out.push_str(&format!("   Refunds: {}\n", set.refund_count()));
    }
    out.push_str(&format!("   Fingerprint: {}\n", set.fingerprint()));
    out
}

pub fn cmd_show(file: &Path, delimiter: char, limit: usize, config: &DashboardConfig) -> Result<()> {
    let set = read_table(file, delimiter)?;

    if set.is_empty() {
        println!("No transactions in {}", file.display());
        return Ok(());
    }

    print!("{}", render_rows(&set, limit, &config.currency));
    Ok(())
}

/// Render up to `limit` rows as a fixed-width table
pub fn render_rows(set: &TransactionSet, limit: usize, currency: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>5}  {:10}  {:24}  {:>16}\n",
        "ROW", "TANGGAL", "KATEGORI", "JUMLAH"
    ));
    out.push_str(&format!("{}\n", "-".repeat(61)));

    for tx in set.iter().take(limit) {
        out.push_str(&format!(
            "{:>5}  {:10}  {:24}  {:>16}\n",
            tx.row,
            tx.date.format(DATE_FORMAT).to_string(),
            truncate(&tx.category, 24),
            format_money(tx.amount, currency)
        ));
    }

    if set.len() > limit {
        out.push_str(&format!("... {} more row(s)\n", set.len() - limit));
    }
    out
}

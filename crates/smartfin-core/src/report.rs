//! Report assembly and the end-to-end analysis pipeline
//!
//! ```rust,ignore
//! use smartfin_core::analyze;
//!
//! let report = analyze(std::fs::File::open("transaksi.csv")?)?;
//! println!("Total: {}", report.total);
//! ```

use std::io::Read;

use tracing::info;

use crate::aggregate::Aggregates;
use crate::error::{Error, Result};
use crate::forecast::forecast_next_month;
use crate::import::parse_csv;
use crate::models::{AnalysisReport, Forecast, Recommendation, Summary, TransactionSet};
use crate::rules::RuleEngine;

/// Summary note used when no recommendation fired
pub const STABLE_NOTE: &str = "Keuangan stabil dan sehat!";

/// Parse a comma-delimited table and run the full analysis
pub fn analyze<R: Read>(reader: R) -> Result<AnalysisReport> {
    let set = parse_csv(reader)?;
    analyze_set(&set)
}

/// Run aggregation, rules, forecast and summary over a parsed table
///
/// Halts with `Error::EmptyData` before any aggregation when the table has
/// no rows.
pub fn analyze_set(set: &TransactionSet) -> Result<AnalysisReport> {
    let (first_date, last_date) = set.date_range().ok_or(Error::EmptyData)?;

    let aggregates = Aggregates::compute(set);
    let recommendations = RuleEngine::new().evaluate(aggregates.total, &aggregates.category_totals);
    let forecast = forecast_next_month(&aggregates.monthly_totals)?;
    let summary = assemble_summary(&aggregates, &forecast, &recommendations)?;

    info!(
        rows = set.len(),
        total = aggregates.total,
        warnings = recommendations.len(),
        forecast = forecast.amount,
        "Analysis complete"
    );

    Ok(AnalysisReport {
        transaction_count: set.len(),
        refund_count: set.refund_count(),
        first_date,
        last_date,
        fingerprint: set.fingerprint().to_string(),
        total: aggregates.total,
        category_totals: aggregates.category_totals,
        monthly_totals: aggregates.monthly_totals,
        recommendations,
        forecast: forecast.amount,
        forecast_detail: forecast,
        summary,
    })
}

/// Combine totals, forecast and recommendations into the summary record
///
/// Substitutes [`STABLE_NOTE`] when no recommendation fired.
pub fn assemble_summary(
    aggregates: &Aggregates,
    forecast: &Forecast,
    recommendations: &[Recommendation],
) -> Result<Summary> {
    let top_category = aggregates
        .category_totals
        .max()
        .cloned()
        .ok_or(Error::EmptyData)?;
    let peak_month = aggregates.peak_month().ok_or(Error::EmptyData)?;

    let notes = if recommendations.is_empty() {
        vec![STABLE_NOTE.to_string()]
    } else {
        recommendations.iter().map(|r| r.message().to_string()).collect()
    };

    Ok(Summary {
        total: aggregates.total,
        top_category,
        peak_month,
        forecast: forecast.amount,
        notes,
    })
}

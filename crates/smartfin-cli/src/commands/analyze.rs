//! Dashboard command implementation

use std::fmt::{self, Write as _};
use std::path::Path;

use anyhow::{Context, Result};
use smartfin_core::{analyze_set, AnalysisReport};

use super::{format_money, read_table, truncate};
use crate::cli::OutputFormat;
use crate::config::DashboardConfig;

/// Shown instead of the warning list when no rule fired
pub const STABLE_MESSAGE: &str = "Keuangan stabil! Tidak ditemukan pengeluaran berlebihan.";

pub fn cmd_analyze(
    file: &Path,
    delimiter: char,
    config: &DashboardConfig,
    format: OutputFormat,
) -> Result<()> {
    let set = read_table(file, delimiter)?;
    let report = analyze_set(&set)
        .with_context(|| format!("Failed to analyze {}", file.display()))?;

    print!("{}", render_report(&report, config, format)?);
    Ok(())
}

/// Render a report in the requested output format
pub fn render_report(
    report: &AnalysisReport,
    config: &DashboardConfig,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_dashboard(report, config)?),
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(report)?)),
    }
}

/// Render the full text dashboard for a report
pub fn render_dashboard(
    report: &AnalysisReport,
    config: &DashboardConfig,
) -> Result<String, fmt::Error> {
    let palette = config.theme.palette();
    let money = |amount: f64| format_money(amount, &config.currency);
    let mut out = String::new();

    writeln!(out)?;
    writeln!(
        out,
        "{}",
        palette.heading("💸 SmartFinance: Pengatur Keuangan Otomatis")
    )?;
    writeln!(
        out,
        "   {} transaksi, {} s/d {}",
        report.transaction_count, report.first_date, report.last_date
    )?;
    if report.refund_count > 0 {
        writeln!(
            out,
            "   {} transaksi bernilai negatif dihitung sebagai refund",
            report.refund_count
        )?;
    }

    // Statistics
    writeln!(out)?;
    writeln!(out, "{}", palette.heading("📊 Statistik Pengeluaran"))?;
    writeln!(
        out,
        "   ─────────────────────────────────────────────────────────────"
    )?;
    writeln!(out, "   Total Pengeluaran: {}", money(report.total))?;
    writeln!(out)?;
    writeln!(
        out,
        "   {:18} │ {:>16} │ {:>6} │ Grafik",
        "Kategori", "Jumlah", "%"
    )?;
    writeln!(
        out,
        "   ───────────────────┼──────────────────┼────────┼──────────"
    )?;

    let max_category = report
        .category_totals
        .iter()
        .map(|c| c.total)
        .fold(0.0_f64, f64::max);
    for cat in report.category_totals.iter() {
        writeln!(
            out,
            "   {:18} │ {:>16} │ {:>5.1}% │ {}",
            truncate(&cat.category, 18),
            money(cat.total),
            report.category_share(&cat.category) * 100.0,
            palette.bar(bar_len(cat.total, max_category, config.bar_width))
        )?;
    }

    // Recommendations
    writeln!(out)?;
    writeln!(out, "{}", palette.heading("🤖 Rekomendasi"))?;
    if report.recommendations.is_empty() {
        writeln!(out, "   ✅ {}", palette.success(STABLE_MESSAGE))?;
    } else {
        for rec in &report.recommendations {
            writeln!(out, "   ⚠️  {}", palette.warning(rec.message()))?;
        }
    }

    // Monthly trend and forecast
    let detail = &report.forecast_detail;
    writeln!(out)?;
    writeln!(
        out,
        "{}",
        palette.heading("📈 Prediksi Pengeluaran Bulan Depan")
    )?;
    let max_month = report
        .monthly_totals
        .iter()
        .map(|m| m.total)
        .chain(std::iter::once(report.forecast))
        .fold(0.0_f64, f64::max);
    for month in &report.monthly_totals {
        writeln!(
            out,
            "   {:8} │ {:>16} │ {}",
            month.month.to_string(),
            money(month.total),
            palette.bar(bar_len(month.total, max_month, config.bar_width))
        )?;
    }
    writeln!(
        out,
        "   {:8} │ {:>16} │ {}",
        detail.target.to_string(),
        money(report.forecast),
        palette.accent("(prediksi)")
    )?;
    writeln!(
        out,
        "   Tren: {} per bulan sejak {}",
        money(detail.slope),
        detail.origin
    )?;
    writeln!(
        out,
        "   Prediksi pengeluaran bulan depan: {}",
        palette.accent(&money(report.forecast))
    )?;

    // Summary
    let summary = &report.summary;
    writeln!(out)?;
    writeln!(out, "{}", palette.heading("📝 Ringkasan Laporan Otomatis"))?;
    writeln!(out, "   - Total Pengeluaran: {}", money(summary.total))?;
    writeln!(
        out,
        "   - Pengeluaran Terbesar: {} ({})",
        summary.top_category.category,
        money(summary.top_category.total)
    )?;
    writeln!(
        out,
        "   - Bulan dengan pengeluaran tertinggi: {}",
        summary.peak_month.month
    )?;
    writeln!(
        out,
        "   - Prediksi Pengeluaran Bulan Depan: {}",
        money(summary.forecast)
    )?;
    writeln!(out)?;
    writeln!(out, "   Catatan: {}", summary.notes.join("; "))?;

    Ok(out)
}

/// Bar length proportional to `value / max`; non-positive values get no bar
fn bar_len(value: f64, max: f64, width: usize) -> usize {
    if value <= 0.0 || max <= 0.0 {
        return 0;
    }
    let len = (value / max * width as f64).round() as usize;
    len.clamp(1, width)
}

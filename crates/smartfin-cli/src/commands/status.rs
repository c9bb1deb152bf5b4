//! Configuration display

use anyhow::Result;
use smartfin_core::rules::{
    ENTERTAINMENT_CATEGORY, ENTERTAINMENT_SHARE_LIMIT, FOOD_CATEGORY, FOOD_SHARE_LIMIT,
    TOTAL_LIMIT,
};

use super::format_money;
use crate::config::{default_config_path, ConfigSource, DashboardConfig};

pub fn cmd_config(config: &DashboardConfig, source: &ConfigSource) -> Result<()> {
    println!();
    println!("⚙️  SmartFinance Config");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Source: {}", source);
    println!("   Theme: {}", config.theme);
    println!("   Bar width: {}", config.bar_width);
    println!("   Currency: {}", config.currency);

    match default_config_path() {
        Some(path) if path.exists() => println!("   User override: {}", path.display()),
        Some(path) => println!("   User override: {} (not present)", path.display()),
        None => println!("   User override: (no config directory)"),
    }

    println!();
    println!("   Rules (fixed):");
    println!(
        "   - {} above {:.0}% of total",
        FOOD_CATEGORY,
        FOOD_SHARE_LIMIT * 100.0
    );
    println!(
        "   - {} above {:.0}% of total",
        ENTERTAINMENT_CATEGORY,
        ENTERTAINMENT_SHARE_LIMIT * 100.0
    );
    println!(
        "   - total above {}",
        format_money(TOTAL_LIMIT, &config.currency)
    );

    Ok(())
}

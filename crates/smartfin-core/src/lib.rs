//! SmartFinance Core Library
//!
//! Analysis pipeline for the SmartFinance spending dashboard:
//! - Schema validation and parsing of transaction tables
//! - Aggregation by category and by month
//! - Fixed advisory rules for budgeting warnings
//! - Linear trend forecast of next month's spending
//! - Report assembly for the presentation layer

pub mod aggregate;
pub mod error;
pub mod forecast;
pub mod import;
pub mod models;
pub mod report;
pub mod rules;

pub use aggregate::Aggregates;
pub use error::{Error, Result};
pub use forecast::forecast_next_month;
pub use import::{parse_csv, parse_csv_with_delimiter};
pub use models::{
    AnalysisReport, CategoryTotal, CategoryTotals, Forecast, MonthKey, MonthlyTotal,
    Recommendation, Summary, Transaction, TransactionSet,
};
pub use report::{analyze, analyze_set, assemble_summary, STABLE_NOTE};
pub use rules::{AdvisoryRule, RuleEngine};

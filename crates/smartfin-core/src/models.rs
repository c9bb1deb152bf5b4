//! Data models for SmartFinance

use std::collections::HashMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// One row of the uploaded table after validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// 1-based data row number (header excluded)
    pub row: usize,
    pub date: NaiveDate,
    pub category: String,
    /// Currency amount; negative values are refunds
    pub amount: f64,
}

impl Transaction {
    pub fn month(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }

    pub fn is_refund(&self) -> bool {
        self.amount < 0.0
    }
}

/// Ordered, immutable set of transactions from one uploaded table
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionSet {
    transactions: Vec<Transaction>,
    /// SHA-256 of the raw input bytes
    fingerprint: String,
}

impl TransactionSet {
    pub fn new(transactions: Vec<Transaction>, fingerprint: String) -> Self {
        Self {
            transactions,
            fingerprint,
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.transactions.iter()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Earliest and latest transaction dates
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.transactions.iter().map(|t| t.date).min()?;
        let last = self.transactions.iter().map(|t| t.date).max()?;
        Some((first, last))
    }

    /// Distinct categories in order of first appearance
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for tx in &self.transactions {
            if !seen.contains(&tx.category.as_str()) {
                seen.push(&tx.category);
            }
        }
        seen
    }

    pub fn refund_count(&self) -> usize {
        self.transactions.iter().filter(|t| t.is_refund()).count()
    }
}

impl<'a> IntoIterator for &'a TransactionSet {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.transactions.iter()
    }
}

/// Calendar month bucket, keyed by year so January 2023 and January 2024
/// stay separate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Months since year 0; consecutive calendar months differ by one
    pub fn ordinal(&self) -> i64 {
        self.year as i64 * 12 + (self.month as i64 - 1)
    }

    pub fn from_ordinal(ordinal: i64) -> Self {
        Self {
            year: ordinal.div_euclid(12) as i32,
            month: ordinal.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn next(&self) -> Self {
        Self::from_ordinal(self.ordinal() + 1)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// Category → summed amount, iterated in order of first appearance
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTotals {
    entries: Vec<CategoryTotal>,
    index: HashMap<String, usize>,
}

impl CategoryTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an amount to a category, creating it on first use
    pub fn add(&mut self, category: &str, amount: f64) {
        match self.index.get(category) {
            Some(&idx) => self.entries[idx].total += amount,
            None => {
                self.index.insert(category.to_string(), self.entries.len());
                self.entries.push(CategoryTotal {
                    category: category.to_string(),
                    total: amount,
                });
            }
        }
    }

    /// Total for a category; absent categories contribute 0
    pub fn get(&self, category: &str) -> f64 {
        self.index
            .get(category)
            .map(|&idx| self.entries[idx].total)
            .unwrap_or(0.0)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CategoryTotal> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn sum(&self) -> f64 {
        self.entries.iter().map(|e| e.total).sum()
    }

    /// Category with the largest total; ties go to the first encountered
    pub fn max(&self) -> Option<&CategoryTotal> {
        let mut best: Option<&CategoryTotal> = None;
        for entry in &self.entries {
            match best {
                Some(b) if entry.total <= b.total => {}
                _ => best = Some(entry),
            }
        }
        best
    }
}

impl Serialize for CategoryTotals {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.category, &entry.total)?;
        }
        map.end()
    }
}

/// Summed amount for one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    #[serde(flatten)]
    pub month: MonthKey,
    pub total: f64,
}

/// Fixed catalog of advisory messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recommendation {
    /// Food ("makanan") above 35% of total spending
    FoodSpending,
    /// Entertainment ("hiburan") above 20% of total spending
    EntertainmentSpending,
    /// Total spending above the absolute limit
    HighTotal,
}

impl Recommendation {
    pub fn message(&self) -> &'static str {
        match self {
            Recommendation::FoodSpending => {
                "Pengeluaran makanan terlalu tinggi. Coba atur menu atau masak sendiri."
            }
            Recommendation::EntertainmentSpending => {
                "Biaya hiburan cukup besar. Kurangi kegiatan tidak mendesak."
            }
            Recommendation::HighTotal => {
                "Total pengeluaran bulan ini cukup tinggi. Pertimbangkan membuat anggaran mingguan."
            }
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl Serialize for Recommendation {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

/// Next-month prediction from the linear trend
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Month being predicted (one after the latest month in the data)
    pub target: MonthKey,
    /// Earliest month in the data; the line's x axis counts months from here
    pub origin: MonthKey,
    pub amount: f64,
    /// Change in spending per month
    pub slope: f64,
    /// Fitted spending at `origin`
    pub intercept: f64,
    /// Number of monthly points the line was fitted to
    pub months_used: usize,
}

/// Structured summary shown at the bottom of the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total: f64,
    pub top_category: CategoryTotal,
    pub peak_month: MonthlyTotal,
    pub forecast: f64,
    /// Recommendation messages, or the single "stable" note when none fired
    pub notes: Vec<String>,
}

/// Everything the presentation layer needs from one analysis run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub transaction_count: usize,
    pub refund_count: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub fingerprint: String,
    pub total: f64,
    pub category_totals: CategoryTotals,
    pub monthly_totals: Vec<MonthlyTotal>,
    pub recommendations: Vec<Recommendation>,
    /// Predicted spending for `forecast_detail.target`
    pub forecast: f64,
    pub forecast_detail: Forecast,
    pub summary: Summary,
}

impl AnalysisReport {
    /// Share of total spending for a category, 0 when the total is 0
    pub fn category_share(&self, category: &str) -> f64 {
        if self.total == 0.0 {
            0.0
        } else {
            self.category_totals.get(category) / self.total
        }
    }
}

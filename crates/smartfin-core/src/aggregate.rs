//! Category and monthly aggregation

use std::collections::BTreeMap;

use tracing::debug;

use crate::models::{CategoryTotals, MonthKey, MonthlyTotal, TransactionSet};

/// Derived totals for one transaction set
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregates {
    pub total: f64,
    pub category_totals: CategoryTotals,
    /// One entry per distinct (year, month), ascending
    pub monthly_totals: Vec<MonthlyTotal>,
}

impl Aggregates {
    /// Group a transaction set by category and by month
    ///
    /// An empty set yields a zero total and empty groupings.
    pub fn compute(set: &TransactionSet) -> Self {
        let mut total = 0.0;
        let mut category_totals = CategoryTotals::new();
        let mut by_month: BTreeMap<MonthKey, f64> = BTreeMap::new();

        for tx in set {
            total += tx.amount;
            category_totals.add(&tx.category, tx.amount);
            *by_month.entry(tx.month()).or_insert(0.0) += tx.amount;
        }

        let monthly_totals: Vec<MonthlyTotal> = by_month
            .into_iter()
            .map(|(month, total)| MonthlyTotal { month, total })
            .collect();

        debug!(
            total,
            categories = category_totals.len(),
            months = monthly_totals.len(),
            "Aggregated transactions"
        );

        Self {
            total,
            category_totals,
            monthly_totals,
        }
    }

    /// Month with the highest total; ties go to the earliest month
    pub fn peak_month(&self) -> Option<MonthlyTotal> {
        let mut best: Option<MonthlyTotal> = None;
        for month in &self.monthly_totals {
            match best {
                Some(b) if month.total <= b.total => {}
                _ => best = Some(*month),
            }
        }
        best
    }
}

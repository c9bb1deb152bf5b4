//! Rule Engine - fixed budgeting advisories
//!
//! Each rule compares the aggregated totals against a fixed threshold and
//! independently decides whether its warning applies. Rules never
//! short-circuit each other and always run in registration order:
//!
//! 1. Food ("makanan") above 35% of total
//! 2. Entertainment ("hiburan") above 20% of total
//! 3. Total above 3,000,000
//!
//! All comparisons are strict, so a share of exactly 20% does not fire.

use crate::models::{CategoryTotals, Recommendation};

pub const FOOD_CATEGORY: &str = "makanan";
pub const FOOD_SHARE_LIMIT: f64 = 0.35;

pub const ENTERTAINMENT_CATEGORY: &str = "hiburan";
pub const ENTERTAINMENT_SHARE_LIMIT: f64 = 0.20;

pub const TOTAL_LIMIT: f64 = 3_000_000.0;

/// A single threshold check producing one catalog recommendation
pub trait AdvisoryRule: Send + Sync {
    /// Recommendation emitted when the rule fires
    fn recommendation(&self) -> Recommendation;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Whether the rule fires for these totals
    fn applies(&self, total: f64, categories: &CategoryTotals) -> bool;
}

/// Fires when one category takes more than a fixed share of the total
pub struct CategoryShareRule {
    category: &'static str,
    share_limit: f64,
    recommendation: Recommendation,
    name: &'static str,
}

impl CategoryShareRule {
    pub fn food() -> Self {
        Self {
            category: FOOD_CATEGORY,
            share_limit: FOOD_SHARE_LIMIT,
            recommendation: Recommendation::FoodSpending,
            name: "Food share",
        }
    }

    pub fn entertainment() -> Self {
        Self {
            category: ENTERTAINMENT_CATEGORY,
            share_limit: ENTERTAINMENT_SHARE_LIMIT,
            recommendation: Recommendation::EntertainmentSpending,
            name: "Entertainment share",
        }
    }
}

impl AdvisoryRule for CategoryShareRule {
    fn recommendation(&self) -> Recommendation {
        self.recommendation
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn applies(&self, total: f64, categories: &CategoryTotals) -> bool {
        categories.get(self.category) > total * self.share_limit
    }
}

/// Fires when total spending exceeds the absolute limit
pub struct TotalLimitRule;

impl AdvisoryRule for TotalLimitRule {
    fn recommendation(&self) -> Recommendation {
        Recommendation::HighTotal
    }

    fn name(&self) -> &'static str {
        "Total limit"
    }

    fn applies(&self, total: f64, _categories: &CategoryTotals) -> bool {
        total > TOTAL_LIMIT
    }
}

/// Runs the fixed rule set in order
pub struct RuleEngine {
    rules: Vec<Box<dyn AdvisoryRule>>,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleEngine {
    /// Create an engine with the built-in rules
    pub fn new() -> Self {
        let mut engine = Self { rules: vec![] };

        engine.register(Box::new(CategoryShareRule::food()));
        engine.register(Box::new(CategoryShareRule::entertainment()));
        engine.register(Box::new(TotalLimitRule));

        engine
    }

    fn register(&mut self, rule: Box<dyn AdvisoryRule>) {
        self.rules.push(rule);
    }

    /// Evaluate every rule, returning the ones that fired in rule order
    pub fn evaluate(&self, total: f64, categories: &CategoryTotals) -> Vec<Recommendation> {
        let mut fired = Vec::new();

        for rule in &self.rules {
            let applies = rule.applies(total, categories);
            tracing::debug!(rule = rule.name(), applies, "Rule evaluated");
            if applies {
                fired.push(rule.recommendation());
            }
        }

        fired
    }
}

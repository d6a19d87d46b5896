//! Budget rule violation model
//!
//! The flattened, presentation-ready description of one rule breach. Alert
//! providers only ever see these copied values.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::budget::Budget;
use super::currency::{format_currency, Currency};
use super::record::CostRecord;
use super::rule::BudgetRule;

/// One rule breach for one cost record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetRuleViolation {
    /// Resource the breach was observed on
    pub resource_id: String,

    /// Name of the breached rule
    pub name: String,

    /// Human-readable breached condition
    pub description: String,

    /// Day of the offending record
    pub date: NaiveDate,

    /// Ceiling for the record's period; `None` when a fixed rule fired
    /// against a budget with no ceiling for that period
    pub budget_amount: Option<f64>,

    /// Spend observed on the record
    pub actual_amount: f64,

    /// Currency of the record
    pub currency: Option<Currency>,
}

impl BudgetRuleViolation {
    /// Build a violation from the rule that fired and its inputs
    pub fn new(rule: &BudgetRule, budget: &Budget, record: &CostRecord) -> Self {
        Self {
            resource_id: record.resource_id.clone(),
            name: rule.name.clone(),
            description: rule.description(),
            date: record.date(),
            budget_amount: record.period.and_then(|p| budget.amount_for(p)),
            actual_amount: record.value,
            currency: record.currency.clone(),
        }
    }

    /// Budget amount formatted in the record's currency, or `-` if unset
    pub fn formatted_budget_amount(&self) -> String {
        self.budget_amount
            .map(|amount| format_currency(amount, self.currency.as_ref()))
            .unwrap_or_else(|| "-".to_string())
    }

    /// Actual amount formatted in the record's currency
    pub fn formatted_actual_amount(&self) -> String {
        format_currency(self.actual_amount, self.currency.as_ref())
    }
}

impl fmt::Display for BudgetRuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {} on {} (budget: {}, actual: {})",
            self.resource_id,
            self.name,
            self.description,
            self.date.format("%Y-%m-%d"),
            self.formatted_budget_amount(),
            self.formatted_actual_amount()
        )
    }
}

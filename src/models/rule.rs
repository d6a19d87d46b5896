//! Budget rule model
//!
//! A rule is an immutable comparison policy. It decides, for one budget and
//! one cost record, whether the spend constitutes a violation.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{trace, warn};

use super::budget::Budget;
use super::currency::{deserialize_scope, format_currency, Currency};
use super::period::Period;
use super::record::CostRecord;

/// How a rule compares spend against its threshold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RuleType {
    /// Spend reaches an absolute amount
    Fixed,
    /// Spend reaches a percentage of the budget ceiling
    Percentage,
    /// Spend exceeds the budget ceiling by at least an amount
    Overrun,
    /// Unrecognised type from configuration; never fires
    Unknown(String),
}

impl RuleType {
    /// Name as written in configuration
    pub fn as_str(&self) -> &str {
        match self {
            Self::Fixed => "fixed",
            Self::Percentage => "percentage",
            Self::Overrun => "overrun",
            Self::Unknown(s) => s,
        }
    }

    /// Whether the comparison needs a budget ceiling for the period
    pub fn requires_ceiling(&self) -> bool {
        !matches!(self, Self::Fixed)
    }
}

impl From<String> for RuleType {
    fn from(s: String) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "fixed" => Self::Fixed,
            "percentage" => Self::Percentage,
            "overrun" => Self::Overrun,
            _ => Self::Unknown(s),
        }
    }
}

impl From<RuleType> for String {
    fn from(rule_type: RuleType) -> Self {
        rule_type.as_str().to_string()
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a rule was not applied to a record
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// Neither the rule nor the record states a charge period
    NoPeriod,
    /// The rule is scoped to a different charge period than the record
    PeriodMismatch {
        rule: Period,
        record: Option<Period>,
    },
    /// The budget has no ceiling for the period and the rule needs one
    NoCeiling(Period),
    /// The rule type is not recognised
    UnknownType(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPeriod => write!(f, "unable to determine charge period"),
            Self::PeriodMismatch { rule, record } => match record {
                Some(record) => write!(
                    f,
                    "rule period '{}' does not match charge period '{}'",
                    rule, record
                ),
                None => write!(f, "rule period '{}' but charge has no period", rule),
            },
            Self::NoCeiling(period) => write!(f, "no {} budget found", period),
            Self::UnknownType(t) => write!(f, "unknown rule type '{}'", t),
        }
    }
}

/// Result of applying a rule to one record
#[derive(Debug, Clone, PartialEq)]
pub enum RuleOutcome {
    /// The record breaches the rule
    Violated,
    /// The rule applied and was not breached
    Satisfied,
    /// The rule could not be applied
    Skipped(SkipReason),
}

impl RuleOutcome {
    /// Check if the outcome is a violation
    pub fn is_violated(&self) -> bool {
        matches!(self, Self::Violated)
    }
}

/// A named comparison policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetRule {
    /// Name shown in violation reports
    #[serde(default)]
    pub name: String,

    /// Comparison semantics
    #[serde(rename = "type")]
    pub rule_type: RuleType,

    /// Threshold; an amount for fixed/overrun rules, a percentage otherwise
    pub value: f64,

    /// Charge period the rule applies to; `None` follows the record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,

    /// Currency scope; `None` applies to every currency
    #[serde(
        default,
        deserialize_with = "deserialize_scope",
        skip_serializing_if = "Option::is_none"
    )]
    pub currency: Option<Currency>,

    /// Categories the rule applies to; empty applies to all
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
}

impl BudgetRule {
    /// Create an unscoped rule
    pub fn new(name: impl Into<String>, rule_type: RuleType, value: f64) -> Self {
        Self {
            name: name.into(),
            rule_type,
            value,
            period: None,
            currency: None,
            categories: Vec::new(),
        }
    }

    /// Scope the rule to a charge period
    pub fn with_period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    /// Scope the rule to a currency
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = Some(currency);
        self
    }

    /// Scope the rule to a category (may be called repeatedly)
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.push(category.into());
        self
    }

    /// Check the rule's category and currency scope against a record
    pub fn applies_to(&self, record: &CostRecord) -> bool {
        let category_match = self.categories.is_empty()
            || self
                .categories
                .iter()
                .any(|c| c.eq_ignore_ascii_case(&record.category));
        if category_match && !self.categories.is_empty() {
            trace!(
                resource_id = %record.resource_id,
                category = %record.category,
                "Rule matched by category"
            );
        }

        let currency_match = self.currency.is_none() || self.currency == record.currency;
        category_match && currency_match
    }

    /// Apply the rule to a record against its resolved budget
    pub fn assess(&self, budget: &Budget, record: &CostRecord) -> RuleOutcome {
        let period = match self.period.or(record.period) {
            Some(period) => period,
            None => return RuleOutcome::Skipped(SkipReason::NoPeriod),
        };
        if record.period != Some(period) {
            return RuleOutcome::Skipped(SkipReason::PeriodMismatch {
                rule: period,
                record: record.period,
            });
        }

        let amount = budget.amount_for(period);
        if self.rule_type.requires_ceiling() && amount.is_none() {
            return RuleOutcome::Skipped(SkipReason::NoCeiling(period));
        }

        let violated = match (&self.rule_type, amount) {
            (RuleType::Fixed, _) => record.value >= self.value,
            (RuleType::Percentage, Some(amount)) => record.value >= (self.value / 100.0) * amount,
            (RuleType::Overrun, Some(amount)) => (record.value - amount) >= self.value,
            (RuleType::Unknown(t), _) => {
                return RuleOutcome::Skipped(SkipReason::UnknownType(t.clone()))
            }
            (_, None) => return RuleOutcome::Skipped(SkipReason::NoCeiling(period)),
        };

        if violated {
            RuleOutcome::Violated
        } else {
            RuleOutcome::Satisfied
        }
    }

    /// Evaluate the rule, returning `true` if the record violates it
    ///
    /// Rules that cannot be applied are logged and treated as not violated.
    pub fn evaluate(&self, budget: &Budget, record: &CostRecord) -> bool {
        trace!(rule = %self.name, rule_type = %self.rule_type, value = self.value, "Evaluating rule");
        match self.assess(budget, record) {
            RuleOutcome::Skipped(reason) => {
                warn!(
                    rule = %self.name,
                    resource_id = %record.resource_id,
                    "{}, rule will be skipped",
                    reason
                );
                false
            }
            outcome => outcome.is_violated(),
        }
    }

    /// Human-readable statement of the breached condition
    pub fn description(&self) -> String {
        match self.rule_type {
            RuleType::Percentage => format!("actual amount >= {:.2}% of budget", self.value),
            RuleType::Fixed => format!(
                "actual amount >= {}",
                format_currency(self.value, self.currency.as_ref())
            ),
            RuleType::Overrun => format!(
                "actual amount >= {} overrun",
                format_currency(self.value, self.currency.as_ref())
            ),
            RuleType::Unknown(_) => String::new(),
        }
    }
}

//! Budget model
//!
//! A budget is the spending ceiling configured (or inferred) for a single
//! resource, per charge period, optionally scoped to one currency.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::currency::{deserialize_scope, format_currency, Currency};
use super::period::Period;
use super::record::CostRecord;
use super::rule::BudgetRule;

/// Spending ceiling for a resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// Resource this budget applies to (matched case-insensitively)
    pub resource_id: String,

    /// Currency scope; `None` applies to records in any currency
    #[serde(
        default,
        deserialize_with = "deserialize_scope",
        skip_serializing_if = "Option::is_none"
    )]
    pub currency: Option<Currency>,

    /// Ceiling for monthly charges
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_amount: Option<f64>,

    /// Ceiling for daily charges
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_amount: Option<f64>,

    /// Rules that apply to this resource only
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<BudgetRule>,
}

impl Budget {
    /// Create a budget with no ceilings for a resource
    pub fn new(resource_id: impl Into<String>) -> Self {
        Self {
            resource_id: resource_id.into(),
            ..Self::default()
        }
    }

    /// Set the monthly ceiling
    pub fn with_monthly_amount(mut self, amount: f64) -> Self {
        self.monthly_amount = Some(amount);
        self
    }

    /// Set the daily ceiling
    pub fn with_daily_amount(mut self, amount: f64) -> Self {
        self.daily_amount = Some(amount);
        self
    }

    /// Scope the budget to one currency
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = Some(currency);
        self
    }

    /// Attach a local rule
    pub fn with_rule(mut self, rule: BudgetRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Infer a budget for a record from its baseline
    ///
    /// Returns `None` when the record has no usable baseline. The ceiling is
    /// set for the record's own period; a record without a period yields a
    /// budget with no ceiling at all.
    pub fn from_baseline(record: &CostRecord) -> Option<Self> {
        if record.baseline <= 0.0 {
            return None;
        }

        let mut budget = Self::new(record.resource_id.clone());
        budget.currency = record.currency.clone();
        match record.period {
            Some(Period::Monthly) => budget.monthly_amount = Some(record.baseline),
            Some(Period::Daily) => budget.daily_amount = Some(record.baseline),
            None => {}
        }
        Some(budget)
    }

    /// Check whether any ceiling is set
    ///
    /// A budget without a ceiling is inert: none of its rules are evaluated.
    pub fn has_amount(&self) -> bool {
        self.monthly_amount.is_some() || self.daily_amount.is_some()
    }

    /// Get the ceiling for a period
    pub fn amount_for(&self, period: Period) -> Option<f64> {
        match period {
            Period::Monthly => self.monthly_amount,
            Period::Daily => self.daily_amount,
        }
    }

    /// Check whether this budget covers the given record
    pub fn matches(&self, record: &CostRecord) -> bool {
        self.resource_id.eq_ignore_ascii_case(&record.resource_id)
            && (self.currency.is_none() || self.currency == record.currency)
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let currency = self.currency.as_ref();
        write!(f, "{}", self.resource_id)?;
        if let Some(amount) = self.monthly_amount {
            write!(f, " monthly: {}", format_currency(amount, currency))?;
        }
        if let Some(amount) = self.daily_amount {
            write!(f, " daily: {}", format_currency(amount, currency))?;
        }
        Ok(())
    }
}

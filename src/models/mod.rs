//! Core data models for Wrangler
//!
//! This module contains the data structures of the cost-checking domain:
//! budgets, rules, cost records and the violations produced from them.

pub mod budget;
pub mod currency;
pub mod period;
pub mod record;
pub mod rule;
pub mod violation;

pub use budget::Budget;
pub use currency::{format_currency, format_currency_with_precision, Currency};
pub use period::Period;
pub use record::CostRecord;
pub use rule::{BudgetRule, RuleOutcome, RuleType, SkipReason};
pub use violation::BudgetRuleViolation;

//! Service layer for Wrangler
//!
//! The service layer holds the budget checking logic on top of the models:
//! budget resolution, rule selection and violation collection.

pub mod budget;

pub use budget::{check_budgets, get_violations, select_rules, BudgetChecker};

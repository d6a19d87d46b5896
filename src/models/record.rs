//! Cost record model
//!
//! A cost record is one period-scoped spend figure for a resource, as
//! supplied by a data provider.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::currency::Currency;
use super::period::Period;

/// Baseline value meaning "no baseline available"
pub const NO_BASELINE: f64 = -1.0;

/// One observed spend total for a resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostRecord {
    /// Resource the spend belongs to
    pub resource_id: String,

    /// When the spend was observed
    pub timestamp: DateTime<Utc>,

    /// Charge period the value covers
    pub period: Option<Period>,

    /// Actual spend
    pub value: f64,

    /// Currency of `value`
    pub currency: Option<Currency>,

    /// Expected spend, used to infer a budget when none is configured.
    /// Values <= 0 mean no baseline is available.
    pub baseline: f64,

    /// Free-text classification matched against rule categories
    pub category: String,
}

impl CostRecord {
    /// Create a record with no currency, baseline or category
    pub fn new(resource_id: impl Into<String>, period: Period, value: f64) -> Self {
        Self {
            resource_id: resource_id.into(),
            timestamp: DateTime::<Utc>::default(),
            period: Some(period),
            value,
            currency: None,
            baseline: NO_BASELINE,
            category: String::new(),
        }
    }

    /// Set the currency
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = Some(currency);
        self
    }

    /// Set the baseline
    pub fn with_baseline(mut self, baseline: f64) -> Self {
        self.baseline = baseline;
        self
    }

    /// Set the category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the observation time
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Calendar day of the observation
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

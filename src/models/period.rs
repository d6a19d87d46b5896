//! Charge period representation
//!
//! A period is the granularity a cost figure covers. Rules and records both
//! carry one; they must agree before a rule is applied.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Charge period of a cost record or budget rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// Calendar-month totals
    Monthly,
    /// Single-day totals
    Daily,
}

impl Period {
    /// Lowercase name as used in configuration and CSV input
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Daily => "daily",
        }
    }
}

impl FromStr for Period {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" => Ok(Self::Monthly),
            "daily" => Ok(Self::Daily),
            _ => Err(PeriodParseError::Unknown(s.to_string())),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    Unknown(String),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(s) => write!(f, "Unknown charge period: {}", s),
        }
    }
}

impl std::error::Error for PeriodParseError {}

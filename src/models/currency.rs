//! Currency codes and amount formatting
//!
//! Amounts are carried as `f64` in the currency's major unit. Formatting
//! renders a fixed number of decimal places, prefixed with the currency
//! symbol when one is known.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Default number of decimal places used when rendering amounts
pub const DEFAULT_PRECISION: usize = 2;

/// An ISO 4217 currency code
///
/// The common billing currencies have dedicated variants so that their
/// symbols can be looked up; any other code is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Currency {
    Gbp,
    Usd,
    Eur,
    Other(String),
}

impl Currency {
    /// The ISO code for this currency
    pub fn code(&self) -> &str {
        match self {
            Self::Gbp => "GBP",
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Other(code) => code,
        }
    }

    /// The display symbol, if this is one of the known currencies
    pub fn symbol(&self) -> Option<&'static str> {
        match self {
            Self::Gbp => Some("£"),
            Self::Usd => Some("$"),
            Self::Eur => Some("€"),
            Self::Other(_) => None,
        }
    }

    /// Parse a currency code, returning `None` for a blank value
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            None
        } else {
            Some(Self::from(s.to_string()))
        }
    }
}

impl From<String> for Currency {
    fn from(code: String) -> Self {
        match code.as_str() {
            "GBP" => Self::Gbp,
            "USD" => Self::Usd,
            "EUR" => Self::Eur,
            _ => Self::Other(code),
        }
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.code().to_string()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Deserialize an optional currency scope, treating a blank code as unset
pub fn deserialize_scope<'de, D>(deserializer: D) -> Result<Option<Currency>, D::Error>
where
    D: Deserializer<'de>,
{
    let code: Option<String> = Option::deserialize(deserializer)?;
    Ok(code.as_deref().and_then(Currency::parse))
}

/// Format an amount with two decimal places
pub fn format_currency(value: f64, currency: Option<&Currency>) -> String {
    format_currency_with_precision(value, currency, DEFAULT_PRECISION)
}

/// Format an amount with the given number of decimal places
///
/// Known currencies are prefixed with their symbol (`£12.50`), unknown ones
/// are suffixed with their code (`12.50 CHF`), and no currency renders the
/// bare number.
pub fn format_currency_with_precision(
    value: f64,
    currency: Option<&Currency>,
    decimals: usize,
) -> String {
    let formatted = format!("{:.*}", decimals, value);
    match currency {
        Some(c) => match c.symbol() {
            Some(symbol) => format!("{}{}", symbol, formatted),
            None if c.code().is_empty() => formatted,
            None => format!("{} {}", formatted, c.code()),
        },
        None => formatted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(Currency::from("GBP".to_string()), Currency::Gbp);
        assert_eq!(Currency::from("USD".to_string()), Currency::Usd);
        assert_eq!(Currency::from("EUR".to_string()), Currency::Eur);
        assert_eq!(
            Currency::from("CHF".to_string()),
            Currency::Other("CHF".into())
        );
    }

    #[test]
    fn test_parse_blank() {
        assert_eq!(Currency::parse(""), None);
        assert_eq!(Currency::parse("  "), None);
        assert_eq!(Currency::parse(" GBP"), Some(Currency::Gbp));
    }

    #[test]
    fn test_format_known_symbol() {
        assert_eq!(format_currency(20.0, Some(&Currency::Gbp)), "£20.00");
        assert_eq!(format_currency(1.5, Some(&Currency::Usd)), "$1.50");
        assert_eq!(format_currency(0.126, Some(&Currency::Eur)), "€0.13");
    }

    #[test]
    fn test_format_unknown_code() {
        let chf = Currency::Other("CHF".into());
        assert_eq!(format_currency(12.5, Some(&chf)), "12.50 CHF");
    }

    #[test]
    fn test_format_without_currency() {
        assert_eq!(format_currency(20.0, None), "20.00");
        assert_eq!(format_currency_with_precision(1.23456, None, 3), "1.235");
    }

    #[test]
    fn test_blank_scope_is_unset() {
        #[derive(Deserialize)]
        struct Scoped {
            #[serde(default, deserialize_with = "deserialize_scope")]
            currency: Option<Currency>,
        }

        let blank: Scoped = serde_yaml::from_str("currency: ''").unwrap();
        assert_eq!(blank.currency, None);
        let missing: Scoped = serde_yaml::from_str("{}").unwrap();
        assert_eq!(missing.currency, None);
        let set: Scoped = serde_yaml::from_str("currency: EUR").unwrap();
        assert_eq!(set.currency, Some(Currency::Eur));
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&Currency::Gbp).unwrap();
        assert_eq!(json, "\"GBP\"");

        let parsed: Currency = serde_json::from_str("\"JPY\"").unwrap();
        assert_eq!(parsed, Currency::Other("JPY".into()));
    }
}

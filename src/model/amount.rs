//! Amount type for handling monetary values with optional dollar signs.
//!
//! This module provides the `Amount` type which wraps `Decimal` and handles
//! parsing values that may or may not include a dollar sign and commas.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Represents a dollar amount.
///
/// This type wraps `Decimal` and provides custom serialization/deserialization
/// to handle amounts that may be formatted with or without dollar signs or commas.
/// Regardless of how an amount was parsed, it always displays in the dashboard's
/// canonical form: a dollar sign and thousands separators, e.g. `$1,234.56`.
///
/// # Examples
///
/// Parsing with dollar sign and commas:
/// ```
/// # use brewboard::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("$1,234.50").unwrap();
/// assert_eq!(amount.to_string(), "$1,234.50");
/// ```
///
/// Parsing a bare number:
/// ```
/// # use brewboard::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("1234.5").unwrap();
/// assert_eq!(amount.to_string(), "$1,234.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount {
    /// The parsed numerical value.
    value: Decimal,
}

impl Amount {
    /// Creates a new Amount from a Decimal value.
    pub const fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.value().is_zero()
    }

    /// Returns true if the amount is positive.
    pub fn is_positive(&self) -> bool {
        !self.is_zero() && self.value().is_sign_positive()
    }

    /// Returns true if the amount is negative.
    pub fn is_negative(&self) -> bool {
        self.value().is_sign_negative()
    }

    /// Returns the amount rounded to `dp` decimal places, half away from zero.
    pub fn round_dp(&self, dp: u32) -> Self {
        Self::new(
            self.value()
                .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero),
        )
    }
}

/// An error that can occur when parsing strings into `Decimal` values.
pub struct AmountError(rust_decimal::Error);

impl Debug for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl std::error::Error for AmountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Remove whitespace
        let trimmed = s.trim();

        // Handle empty string
        if trimmed.is_empty() {
            return Ok(Amount::default());
        }

        // Remove dollar sign if present
        let without_dollar = if let Some(after_minus) = trimmed.strip_prefix('-') {
            // Negative number: could be "-$50.00" or "-50.00"
            if let Some(after_dollar) = after_minus.strip_prefix('$') {
                format!("-{after_dollar}")
            } else {
                trimmed.to_string()
            }
        } else if let Some(after_dollar) = trimmed.strip_prefix('$') {
            // Positive number with dollar sign: "$50.00"
            after_dollar.to_string()
        } else {
            // No dollar sign
            trimmed.to_string()
        };

        // Remove commas (thousand separators)
        let without_commas = without_dollar.replace(',', "");

        // Parse the decimal value
        let value = Decimal::from_str(&without_commas).map_err(AmountError)?;
        Ok(Amount { value })
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (sign, num) = if self.is_negative() {
            (String::from("-"), self.value().abs())
        } else {
            (String::new(), self.value())
        };

        write!(
            f,
            "{sign}${}",
            format_num::format_num!(",.2", num.to_f64().unwrap_or_default())
        )
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Serialize as a string with dollar sign
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Amount::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_dollar_sign() {
        let amount = Amount::from_str("$50.00").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("50.00").unwrap());
    }

    #[test]
    fn test_parse_without_dollar_sign() {
        let amount = Amount::from_str("50.00").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("50.00").unwrap());
    }

    #[test]
    fn test_parse_negative_with_dollar_sign() {
        let amount = Amount::from_str("-$50.00").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("-50.00").unwrap());
    }

    #[test]
    fn test_parse_empty_string() {
        let amount = Amount::from_str("").unwrap();
        assert_eq!(amount.value(), Decimal::ZERO);
    }

    #[test]
    fn test_parse_whitespace() {
        let amount = Amount::from_str("  $50.00  ").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("50.00").unwrap());
    }

    #[test]
    fn test_parse_garbage_is_an_error() {
        assert!(Amount::from_str("abc").is_err());
    }

    #[test]
    fn test_parse_with_commas() {
        let amount = Amount::from_str("$1,234.50").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("1234.5").unwrap());
    }

    #[test]
    fn test_parse_multiple_commas() {
        let amount = Amount::from_str("$1,234,567.89").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("1234567.89").unwrap());
    }

    #[test]
    fn test_parse_commas_without_dollar() {
        let amount = Amount::from_str("1,000.00").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("1000.00").unwrap());
    }

    #[test]
    fn test_display_grouping() {
        let amount = Amount::new(Decimal::from_str("1234.56").unwrap());
        assert_eq!(amount.to_string(), "$1,234.56");
    }

    #[test]
    fn test_display_zero() {
        let amount = Amount::new(Decimal::ZERO);
        assert_eq!(amount.to_string(), "$0.00");
    }

    #[test]
    fn test_display_negative() {
        let amount = Amount::new(Decimal::from_str("-50.00").unwrap());
        assert_eq!(amount.to_string(), "-$50.00");
    }

    #[test]
    fn test_display_canonicalizes_bare_input() {
        let amount = Amount::from_str("1000000").unwrap();
        assert_eq!(amount.to_string(), "$1,000,000.00");
    }

    #[test]
    fn test_serialize() {
        let amount = Amount::new(Decimal::from_str("50.00").unwrap());
        let json = serde_json::to_string(&amount).unwrap();
        assert_eq!(json, "\"$50.00\"");
    }

    #[test]
    fn test_deserialize_with_dollar() {
        let json = "\"$50.00\"";
        let amount: Amount = serde_json::from_str(json).unwrap();
        assert_eq!(amount.value(), Decimal::from_str("50.00").unwrap());
    }

    #[test]
    fn test_deserialize_without_dollar() {
        let json = "\"50.00\"";
        let amount: Amount = serde_json::from_str(json).unwrap();
        assert_eq!(amount.value(), Decimal::from_str("50.00").unwrap());
    }

    #[test]
    fn test_round_dp() {
        let amount = Amount::from_str("6.666666").unwrap();
        assert_eq!(
            amount.round_dp(2).value(),
            Decimal::from_str("6.67").unwrap()
        );
    }

    #[test]
    fn test_round_dp_midpoint_goes_away_from_zero() {
        let amount = Amount::from_str("0.125").unwrap();
        assert_eq!(
            amount.round_dp(2).value(),
            Decimal::from_str("0.13").unwrap()
        );
    }

    #[test]
    fn test_is_zero() {
        let zero = Amount::from_str("$0.00").unwrap();
        assert!(zero.is_zero());

        let non_zero = Amount::from_str("$50.00").unwrap();
        assert!(!non_zero.is_zero());
    }

    #[test]
    fn test_is_negative() {
        let negative = Amount::from_str("-$50.00").unwrap();
        assert!(negative.is_negative());

        let positive = Amount::from_str("$50.00").unwrap();
        assert!(!positive.is_negative());
    }

    #[test]
    fn test_ordering() {
        let a1 = Amount::from_str("$30.00").unwrap();
        let a2 = Amount::from_str("$50.00").unwrap();
        assert!(a1 < a2);
    }
}

//! Filter state for the dashboard: product selector plus inclusive month range.

use crate::model::month::{MONTH_MAX, MONTH_MIN};
use crate::model::Transaction;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The selector option that matches every product.
pub const ALL_COFFEES_STR: &str = "All";

/// The product filter: every coffee, or exactly one by name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CoffeeSelector {
    #[default]
    All,
    Coffee(String),
}

impl CoffeeSelector {
    /// Builds a selector from a selector-control value. The reserved `All`
    /// spelling selects everything; any other string is a product name.
    pub fn from_name(name: impl Into<String>) -> Self {
        let name = name.into();
        if name == ALL_COFFEES_STR {
            Self::All
        } else {
            Self::Coffee(name)
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// True when a transaction with this product name passes the selector.
    pub fn matches(&self, coffee_name: &str) -> bool {
        match self {
            Self::All => true,
            Self::Coffee(name) => name == coffee_name,
        }
    }
}

impl fmt::Display for CoffeeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "{ALL_COFFEES_STR}"),
            Self::Coffee(name) => write!(f, "{name}"),
        }
    }
}

impl FromStr for CoffeeSelector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl Serialize for CoffeeSelector {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CoffeeSelector {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from_name(s))
    }
}

/// The dashboard's active filter.
///
/// The month bounds are kept in `1..=12` with `month_min <= month_max` at all
/// times: each setter clamps the incoming value into the calendar range and
/// then against the other bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FilterState {
    coffee: CoffeeSelector,
    month_min: u8,
    month_max: u8,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            coffee: CoffeeSelector::All,
            month_min: MONTH_MIN,
            month_max: MONTH_MAX,
        }
    }
}

impl FilterState {
    pub fn new(coffee: CoffeeSelector, month_min: u8, month_max: u8) -> Self {
        let mut filter = Self {
            coffee,
            ..Self::default()
        };
        filter.set_month_min(month_min);
        filter.set_month_max(month_max);
        filter
    }

    pub fn set_coffee(&mut self, coffee: CoffeeSelector) {
        self.coffee = coffee;
    }

    /// Moves the lower bound. A value above the upper bound lands on it.
    pub fn set_month_min(&mut self, month: u8) {
        self.month_min = month.clamp(MONTH_MIN, MONTH_MAX).min(self.month_max);
    }

    /// Moves the upper bound. A value below the lower bound lands on it.
    pub fn set_month_max(&mut self, month: u8) {
        self.month_max = month.clamp(MONTH_MIN, MONTH_MAX).max(self.month_min);
    }

    pub fn coffee(&self) -> &CoffeeSelector {
        &self.coffee
    }

    pub fn month_min(&self) -> u8 {
        self.month_min
    }

    pub fn month_max(&self) -> u8 {
        self.month_max
    }

    /// True when the transaction passes both the product selector and the
    /// month range. Sentinel months never pass the range.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        self.coffee.matches(transaction.coffee_name())
            && transaction
                .month_sort()
                .in_range(self.month_min, self.month_max)
    }

    /// The retained subset, in the input order.
    pub fn apply(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        transactions
            .iter()
            .filter(|t| self.matches(t))
            .cloned()
            .collect()
    }
}

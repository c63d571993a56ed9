//! Types that represent the core data model, such as `Transaction` and `FilterState`.
mod amount;
mod filter;
mod month;
mod row;
mod slot;
mod transaction;

pub use amount::{Amount, AmountError};
pub use filter::{CoffeeSelector, FilterState, ALL_COFFEES_STR};
pub use month::{MonthSort, MONTH_MAX, MONTH_MIN};
pub use row::{CellValue, RawRow};
use serde::{Deserialize, Serialize};
pub use slot::TimeSlot;
pub use transaction::{
    Transaction, COFFEE_ALIASES, ID_ALIASES, MONTH_ALIASES, SALES_ALIASES, TIME_ALIASES,
};

/// The session dataset: every normalized sales row, in source order.
///
/// Built once per session from the loader's output and never mutated. All
/// filtering and aggregation reads from here.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SalesData {
    transactions: Vec<Transaction>,
}

impl SalesData {
    /// Normalizes the loader's raw rows, one transaction per row, in order.
    pub fn from_raw(rows: &[RawRow]) -> Self {
        Self {
            transactions: rows.iter().map(Transaction::from_raw).collect(),
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Options for the product selector control: the `All` entry first, then
    /// every distinct product name in the full dataset, ascending.
    pub fn coffee_options(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .transactions
            .iter()
            .map(|t| t.coffee_name().to_string())
            .collect();
        names.sort();
        names.dedup();
        let mut options = vec![ALL_COFFEES_STR.to_string()];
        options.extend(names);
        options
    }
}

//! Normalization of raw spreadsheet rows into fixed-shape transactions.

use crate::model::row::{CellValue, RawRow};
use crate::model::{Amount, MonthSort};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, warn};

/// Accepted column spellings for the sales amount, in resolution order.
pub const SALES_ALIASES: [&str; 3] = ["Sales_amount", "sales_amount", "Sales Amount"];

/// Accepted column spellings for the month ordinal, in resolution order.
pub const MONTH_ALIASES: [&str; 4] = ["Monthsort", "Month Sort", "monthsort", "Month"];

/// Accepted column spellings for the product name, in resolution order.
pub const COFFEE_ALIASES: [&str; 3] = ["coffee_name", "Coffee Name", "coffee"];

/// Accepted column spellings for the transaction identifier, in resolution
/// order. The misspelled `transactio_id` appears in real exports.
pub const ID_ALIASES: [&str; 4] = ["transaction_id", "Transaction ID", "transactio_id", "id"];

/// Accepted column spellings for the time-of-day slot, in resolution order.
pub const TIME_ALIASES: [&str; 4] = ["Time_of_Day", "Time of Day", "time_of_day", "Time"];

/// Represents a single normalized sales row.
///
/// Every field has a safe default, so any raw row normalizes without error:
/// unusable sales amounts become zero, unusable months become the sentinel,
/// and absent strings become empty.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Transaction {
    sales: Amount,
    month_sort: MonthSort,
    coffee_name: String,
    transaction_id: String,
    time_of_day: String,
}

impl Transaction {
    #[cfg(test)]
    pub(crate) fn new(
        sales: Amount,
        month_sort: MonthSort,
        coffee_name: impl Into<String>,
        transaction_id: impl Into<String>,
        time_of_day: impl Into<String>,
    ) -> Self {
        Self {
            sales,
            month_sort,
            coffee_name: coffee_name.into(),
            transaction_id: transaction_id.into(),
            time_of_day: time_of_day.into(),
        }
    }

    /// Normalizes one raw row.
    ///
    /// Each field resolves from its alias list in order, first present column
    /// wins. Alias matching is exact: case and spacing variants are separate
    /// entries in the lists, not patterns.
    pub fn from_raw(row: &RawRow) -> Self {
        Self {
            sales: parse_sales(resolve(row, &SALES_ALIASES)),
            month_sort: parse_month(resolve(row, &MONTH_ALIASES)),
            coffee_name: text_or_empty(resolve(row, &COFFEE_ALIASES)),
            transaction_id: text_or_empty(resolve(row, &ID_ALIASES)),
            time_of_day: text_or_empty(resolve(row, &TIME_ALIASES)),
        }
    }

    /// Writes the transaction back out as a raw row under the canonical
    /// column spellings. Normalizing the result reproduces the transaction.
    pub fn to_raw(&self) -> RawRow {
        let mut row = RawRow::new();
        row.insert(
            SALES_ALIASES[0],
            CellValue::text(self.sales.value().to_string()),
        );
        if let Some(month) = self.month_sort.get() {
            row.insert(MONTH_ALIASES[0], CellValue::number(f64::from(month)));
        }
        row.insert(COFFEE_ALIASES[0], CellValue::text(self.coffee_name.clone()));
        row.insert(ID_ALIASES[0], CellValue::text(self.transaction_id.clone()));
        row.insert(TIME_ALIASES[0], CellValue::text(self.time_of_day.clone()));
        row
    }

    /// Get the sales amount.
    pub fn sales(&self) -> Amount {
        self.sales
    }

    /// Get the month ordinal.
    pub fn month_sort(&self) -> MonthSort {
        self.month_sort
    }

    /// Get the product name.
    pub fn coffee_name(&self) -> &str {
        &self.coffee_name
    }

    /// Get the purchase-event identifier.
    pub fn transaction_id(&self) -> &str {
        &self.transaction_id
    }

    /// Get the time-of-day label, verbatim from the source.
    pub fn time_of_day(&self) -> &str {
        &self.time_of_day
    }
}

/// First present column from the alias list.
fn resolve<'a>(row: &'a RawRow, aliases: &[&str]) -> Option<&'a CellValue> {
    aliases.iter().find_map(|alias| row.get(alias))
}

fn parse_sales(cell: Option<&CellValue>) -> Amount {
    let Some(cell) = cell else {
        return Amount::default();
    };
    let amount = match cell {
        CellValue::Number(n) => Decimal::from_f64(*n).map(Amount::new).unwrap_or_default(),
        CellValue::Text(s) => Amount::from_str(s).unwrap_or_default(),
    };
    if amount.is_negative() {
        debug!("Negative sales amount {amount} floored to zero");
        return Amount::default();
    }
    amount
}

fn parse_month(cell: Option<&CellValue>) -> MonthSort {
    let Some(cell) = cell else {
        return MonthSort::none();
    };
    let month = cell
        .as_f64()
        .map(MonthSort::from_number)
        .unwrap_or_default();
    if month.is_none() && !cell.to_text().trim().is_empty() {
        warn!(
            "Month value '{}' is unusable and the row will never match a month filter",
            cell.to_text()
        );
    }
    month
}

fn text_or_empty(cell: Option<&CellValue>) -> String {
    cell.map(CellValue::to_text).unwrap_or_default()
}

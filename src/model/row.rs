//! Raw spreadsheet rows as produced by the loader, before normalization.

use calamine::Data;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single untyped spreadsheet cell: either text or a number.
///
/// The loader does not interpret cells beyond this split. All typing decisions
/// (monetary parsing, month coercion) happen during normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn number(value: f64) -> Self {
        Self::Number(value)
    }

    /// Converts a workbook cell into a `CellValue`.
    ///
    /// Empty and error cells produce `None` and are left out of the row map.
    /// Booleans keep their spreadsheet spelling, and date-times surface as
    /// their serial number.
    pub fn from_cell(cell: &Data) -> Option<Self> {
        match cell {
            Data::Empty => None,
            Data::String(s) => Some(Self::Text(s.clone())),
            Data::Float(f) => Some(Self::Number(*f)),
            Data::Int(i) => Some(Self::Number(*i as f64)),
            Data::Bool(b) => Some(Self::Text(if *b { "TRUE" } else { "FALSE" }.to_string())),
            Data::DateTime(dt) => Some(Self::Number(dt.as_f64())),
            Data::DateTimeIso(s) => Some(Self::Text(s.clone())),
            Data::DurationIso(s) => Some(Self::Text(s.clone())),
            Data::Error(_) => None,
        }
    }

    /// The cell as a string. Whole numbers render without a trailing `.0` so
    /// numeric identifier columns match their textual spellings.
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => {
                if n.is_finite() && n.fract() == 0.0 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
        }
    }

    /// The cell as a number, parsing textual cells when possible.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// One spreadsheet row, keyed by the header row's column names.
///
/// Cells that were empty in the source are absent from the map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    cells: BTreeMap<String, CellValue>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, convenient for constructing rows in tests.
    pub fn with(mut self, column: impl Into<String>, value: CellValue) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: CellValue) {
        self.cells.insert(column.into(), value);
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cell_skips_empty_and_error() {
        assert_eq!(CellValue::from_cell(&Data::Empty), None);
        assert_eq!(
            CellValue::from_cell(&Data::Error(calamine::CellErrorType::Div0)),
            None
        );
    }

    #[test]
    fn test_from_cell_strings_and_numbers() {
        assert_eq!(
            CellValue::from_cell(&Data::String("Latte".to_string())),
            Some(CellValue::text("Latte"))
        );
        assert_eq!(
            CellValue::from_cell(&Data::Float(3.5)),
            Some(CellValue::number(3.5))
        );
        assert_eq!(
            CellValue::from_cell(&Data::Int(7)),
            Some(CellValue::number(7.0))
        );
    }

    #[test]
    fn test_from_cell_bool_keeps_spreadsheet_spelling() {
        assert_eq!(
            CellValue::from_cell(&Data::Bool(true)),
            Some(CellValue::text("TRUE"))
        );
        assert_eq!(
            CellValue::from_cell(&Data::Bool(false)),
            Some(CellValue::text("FALSE"))
        );
    }

    #[test]
    fn test_to_text_drops_trailing_zero_fraction() {
        assert_eq!(CellValue::number(1001.0).to_text(), "1001");
        assert_eq!(CellValue::number(3.5).to_text(), "3.5");
        assert_eq!(CellValue::text("t1").to_text(), "t1");
    }

    #[test]
    fn test_as_f64_parses_text() {
        assert_eq!(CellValue::text(" 12 ").as_f64(), Some(12.0));
        assert_eq!(CellValue::text("abc").as_f64(), None);
        assert_eq!(CellValue::number(4.0).as_f64(), Some(4.0));
    }

    #[test]
    fn test_row_lookup() {
        let row = RawRow::new().with("Sales_amount", CellValue::text("$10"));
        assert_eq!(row.get("Sales_amount"), Some(&CellValue::text("$10")));
        assert_eq!(row.get("sales_amount"), None);
        assert!(!row.is_empty());
    }
}

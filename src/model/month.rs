//! Calendar-month ordering values used for range filtering.

use serde::{Deserialize, Serialize};

/// The lowest month ordinal.
pub const MONTH_MIN: u8 = 1;

/// The highest month ordinal.
pub const MONTH_MAX: u8 = 12;

/// A transaction's position in the calendar year: a month ordinal in `1..=12`,
/// or a sentinel when the source cell held no usable month.
///
/// The sentinel compares false against every range, so rows that failed month
/// coercion drop out of any month-bounded filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthSort(Option<u8>);

impl MonthSort {
    /// Creates a `MonthSort` from an in-range ordinal.
    ///
    /// Out-of-range values collapse to the sentinel, the same as an
    /// unparsable cell.
    pub fn new(month: u8) -> Self {
        if (MONTH_MIN..=MONTH_MAX).contains(&month) {
            Self(Some(month))
        } else {
            Self(None)
        }
    }

    /// The no-month sentinel.
    pub fn none() -> Self {
        Self(None)
    }

    /// Coerces a numeric cell value: truncates any fraction, then range-checks.
    pub fn from_number(value: f64) -> Self {
        if !value.is_finite() {
            return Self(None);
        }
        let truncated = value.trunc();
        if truncated < f64::from(MONTH_MIN) || truncated > f64::from(MONTH_MAX) {
            return Self(None);
        }
        Self(Some(truncated as u8))
    }

    /// Returns the month ordinal, or `None` for the sentinel.
    pub fn get(&self) -> Option<u8> {
        self.0
    }

    pub fn is_none(&self) -> bool {
        self.0.is_none()
    }

    /// True when the month falls inside the inclusive range. Always false for
    /// the sentinel.
    pub fn in_range(&self, min: u8, max: u8) -> bool {
        matches!(self.0, Some(m) if m >= min && m <= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_ordinals() {
        assert_eq!(MonthSort::new(1).get(), Some(1));
        assert_eq!(MonthSort::new(12).get(), Some(12));
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(MonthSort::new(0).is_none());
        assert!(MonthSort::new(13).is_none());
    }

    #[test]
    fn test_from_number_truncates() {
        assert_eq!(MonthSort::from_number(3.7).get(), Some(3));
        assert_eq!(MonthSort::from_number(12.0).get(), Some(12));
    }

    #[test]
    fn test_from_number_rejects_unusable_values() {
        assert!(MonthSort::from_number(0.9).is_none());
        assert!(MonthSort::from_number(13.0).is_none());
        assert!(MonthSort::from_number(-3.0).is_none());
        assert!(MonthSort::from_number(f64::NAN).is_none());
    }

    #[test]
    fn test_in_range_is_inclusive() {
        let march = MonthSort::new(3);
        assert!(march.in_range(3, 3));
        assert!(march.in_range(1, 12));
        assert!(!march.in_range(4, 12));
        assert!(!march.in_range(1, 2));
    }

    #[test]
    fn test_sentinel_fails_every_range() {
        let missing = MonthSort::none();
        assert!(!missing.in_range(1, 12));
        assert!(!missing.in_range(1, 1));
    }

    #[test]
    fn test_default_is_sentinel() {
        assert!(MonthSort::default().is_none());
    }
}

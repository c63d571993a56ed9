//! Aggregate metrics derived from a filtered transaction subset.
//!
//! Everything here is a pure function of its input slice. The dashboard
//! recomputes the full `AggregateResult` on every filter change rather than
//! maintaining incremental state.

use crate::model::{Amount, TimeSlot, Transaction};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// How many products the rankings keep.
pub const TOP_SELLER_COUNT: usize = 3;

/// One ranked product: its name and summed sales, rounded for display.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProductSales {
    coffee_name: String,
    total: Amount,
}

impl ProductSales {
    pub fn coffee_name(&self) -> &str {
        &self.coffee_name
    }

    pub fn total(&self) -> Amount {
        self.total
    }
}

/// One slot's breakdown: its share of sales, distinct transactions, and top
/// products, computed over only the rows labeled with that slot.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SlotBreakdown {
    slot: TimeSlot,
    total_sales: Amount,
    total_transactions: usize,
    avg_value: Amount,
    top_sellers: Vec<ProductSales>,
}

impl SlotBreakdown {
    pub fn slot(&self) -> TimeSlot {
        self.slot
    }

    pub fn total_sales(&self) -> Amount {
        self.total_sales
    }

    pub fn total_transactions(&self) -> usize {
        self.total_transactions
    }

    pub fn avg_value(&self) -> Amount {
        self.avg_value
    }

    pub fn top_sellers(&self) -> &[ProductSales] {
        &self.top_sellers
    }
}

/// Everything the dashboard derives from one filtered subset.
///
/// Recomputed from scratch on every filter change and never stored.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AggregateResult {
    total_sales: Amount,
    total_transactions: usize,
    avg_value: Amount,
    peak_time_of_day: Option<TimeSlot>,
    slots: Vec<SlotBreakdown>,
    top_overall: Vec<ProductSales>,
}

impl AggregateResult {
    /// Sum of sales over the subset.
    pub fn total_sales(&self) -> Amount {
        self.total_sales
    }

    /// Count of distinct transaction identifiers in the subset. Multi-line
    /// transactions sharing an identifier collapse to one.
    pub fn total_transactions(&self) -> usize {
        self.total_transactions
    }

    /// `total_sales / total_transactions`, or zero for an empty count.
    pub fn avg_value(&self) -> Amount {
        self.avg_value
    }

    /// The slot with the highest summed sales. Ties resolve to the earliest
    /// slot in canonical order. `None` only when there are no slots at all.
    pub fn peak_time_of_day(&self) -> Option<TimeSlot> {
        self.peak_time_of_day
    }

    /// One breakdown per slot, in canonical slot order.
    pub fn slots(&self) -> &[SlotBreakdown] {
        &self.slots
    }

    /// The highest-grossing products across the whole subset.
    pub fn top_overall(&self) -> &[ProductSales] {
        &self.top_overall
    }
}

/// Computes the full set of dashboard aggregates for one subset.
pub fn summarize(transactions: &[Transaction]) -> AggregateResult {
    let total_sales = sum_sales(transactions);
    let total_transactions = distinct_transactions(transactions);
    let avg_value = average(total_sales, total_transactions);

    let mut slot_totals = Vec::with_capacity(TimeSlot::ALL.len());
    let mut slots = Vec::with_capacity(TimeSlot::ALL.len());
    for slot in TimeSlot::ALL {
        let rows: Vec<&Transaction> = transactions
            .iter()
            .filter(|t| t.time_of_day() == slot.label())
            .collect();
        let slot_sales = sum_sales(rows.iter().copied());
        let slot_transactions = distinct_transactions(rows.iter().copied());
        slot_totals.push((slot, slot_sales.value()));
        slots.push(SlotBreakdown {
            slot,
            total_sales: slot_sales.round_dp(2),
            total_transactions: slot_transactions,
            avg_value: average(slot_sales, slot_transactions),
            top_sellers: rank_products(rows.iter().copied()),
        });
    }

    AggregateResult {
        total_sales,
        total_transactions,
        avg_value,
        peak_time_of_day: peak_slot(&slot_totals),
        slots,
        top_overall: rank_products(transactions),
    }
}

fn sum_sales<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Amount {
    Amount::new(transactions.into_iter().map(|t| t.sales().value()).sum())
}

fn distinct_transactions<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> usize {
    transactions
        .into_iter()
        .map(Transaction::transaction_id)
        .collect::<HashSet<_>>()
        .len()
}

fn average(total: Amount, count: usize) -> Amount {
    if count == 0 {
        return Amount::default();
    }
    Amount::new(total.value() / Decimal::from(count)).round_dp(2)
}

/// Groups by product name in encounter order, sums each group, then
/// stable-sorts descending so tied totals keep their encounter order.
fn rank_products<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Vec<ProductSales> {
    let mut order: Vec<String> = Vec::new();
    let mut totals: HashMap<String, Decimal> = HashMap::new();
    for t in transactions {
        let name = t.coffee_name();
        if !totals.contains_key(name) {
            order.push(name.to_string());
        }
        *totals.entry(name.to_string()).or_default() += t.sales().value();
    }

    let mut ranked: Vec<(String, Decimal)> = order
        .into_iter()
        .map(|name| {
            let total = totals.get(&name).copied().unwrap_or_default();
            (name, total)
        })
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(TOP_SELLER_COUNT);
    ranked
        .into_iter()
        .map(|(coffee_name, total)| ProductSales {
            coffee_name,
            total: Amount::new(total).round_dp(2),
        })
        .collect()
}

/// First maximum wins, so ties resolve to the earliest slot.
fn peak_slot(slot_totals: &[(TimeSlot, Decimal)]) -> Option<TimeSlot> {
    let mut best: Option<(TimeSlot, Decimal)> = None;
    for &(slot, total) in slot_totals {
        match best {
            Some((_, best_total)) if total <= best_total => {}
            _ => best = Some((slot, total)),
        }
    }
    best.map(|(slot, _)| slot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FilterState, MonthSort};
    use std::str::FromStr;

    fn t(sales: &str, month: u8, coffee: &str, id: &str, time: &str) -> Transaction {
        Transaction::new(
            Amount::from_str(sales).unwrap(),
            MonthSort::new(month),
            coffee,
            id,
            time,
        )
    }

    /// Four rows, two of which are line-items of the same purchase.
    fn sample() -> Vec<Transaction> {
        vec![
            t("5", 1, "Latte", "t1", "Morning"),
            t("3", 1, "Latte", "t1", "Morning"),
            t("10", 6, "Espresso", "t2", "Night"),
            t("2", 1, "Cappuccino", "t3", "Afternoon"),
        ]
    }

    #[test]
    fn test_dashboard_over_full_dataset() {
        let result = summarize(&sample());

        assert_eq!(result.total_sales().value(), Decimal::from(20));
        assert_eq!(result.total_transactions(), 3);
        assert_eq!(
            result.avg_value().value(),
            Decimal::from_str("6.67").unwrap()
        );
        assert_eq!(result.peak_time_of_day(), Some(TimeSlot::Night));

        let top = result.top_overall();
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].coffee_name(), "Espresso");
        assert_eq!(top[0].total().value(), Decimal::from(10));
        assert_eq!(top[1].coffee_name(), "Latte");
        assert_eq!(top[1].total().value(), Decimal::from(8));
        assert_eq!(top[2].coffee_name(), "Cappuccino");
        assert_eq!(top[2].total().value(), Decimal::from(2));
    }

    #[test]
    fn test_dashboard_narrowed_to_january() {
        let filter = FilterState::new(crate::model::CoffeeSelector::All, 1, 1);
        let subset = filter.apply(&sample());
        let result = summarize(&subset);

        // The Espresso row is month 6 and drops out entirely.
        assert_eq!(subset.len(), 3);
        assert_eq!(result.total_sales().value(), Decimal::from(10));
        assert_eq!(result.total_transactions(), 2);
    }

    #[test]
    fn test_empty_subset_degrades_to_zero() {
        let result = summarize(&[]);
        assert!(result.total_sales().is_zero());
        assert_eq!(result.total_transactions(), 0);
        assert!(result.avg_value().is_zero());
        assert!(result.top_overall().is_empty());
        for breakdown in result.slots() {
            assert!(breakdown.total_sales().is_zero());
            assert_eq!(breakdown.total_transactions(), 0);
            assert!(breakdown.avg_value().is_zero());
            assert!(breakdown.top_sellers().is_empty());
        }
    }

    #[test]
    fn test_distinct_count_never_exceeds_row_count() {
        let data = sample();
        let result = summarize(&data);
        assert!(result.total_transactions() <= data.len());

        let unique = vec![
            t("1", 1, "Latte", "a", "Morning"),
            t("2", 1, "Latte", "b", "Morning"),
        ];
        assert_eq!(summarize(&unique).total_transactions(), unique.len());
    }

    #[test]
    fn test_slot_sums_exclude_unrecognized_labels() {
        let data = vec![
            t("4", 1, "Latte", "a", "Morning"),
            t("6", 1, "Latte", "b", "Brunch"),
        ];
        let result = summarize(&data);

        let slot_sum: Decimal = result
            .slots()
            .iter()
            .map(|b| b.total_sales().value())
            .sum();
        assert_eq!(slot_sum, Decimal::from(4));
        assert_eq!(result.total_sales().value(), Decimal::from(10));
    }

    #[test]
    fn test_peak_tie_resolves_to_earliest_slot() {
        let data = vec![
            t("5", 1, "Latte", "a", "Night"),
            t("5", 1, "Latte", "b", "Morning"),
        ];
        assert_eq!(
            summarize(&data).peak_time_of_day(),
            Some(TimeSlot::Morning)
        );
    }

    #[test]
    fn test_peak_of_zero_sales_is_the_first_slot() {
        assert_eq!(summarize(&[]).peak_time_of_day(), Some(TimeSlot::Morning));
    }

    #[test]
    fn test_ranking_keeps_at_most_three() {
        let data = vec![
            t("1", 1, "A", "a", "Morning"),
            t("2", 1, "B", "b", "Morning"),
            t("3", 1, "C", "c", "Morning"),
            t("4", 1, "D", "d", "Morning"),
            t("5", 1, "E", "e", "Morning"),
        ];
        let top = summarize(&data).top_overall().to_vec();
        assert_eq!(top.len(), TOP_SELLER_COUNT);
        let names: Vec<&str> = top.iter().map(ProductSales::coffee_name).collect();
        assert_eq!(names, vec!["E", "D", "C"]);
        assert!(top.windows(2).all(|w| w[0].total() >= w[1].total()));
    }

    #[test]
    fn test_ranking_length_matches_fewer_products() {
        let data = vec![
            t("1", 1, "Latte", "a", "Morning"),
            t("2", 1, "Mocha", "b", "Morning"),
        ];
        assert_eq!(summarize(&data).top_overall().len(), 2);
    }

    #[test]
    fn test_ranking_ties_keep_encounter_order() {
        let data = vec![
            t("5", 1, "Mocha", "a", "Morning"),
            t("5", 1, "Latte", "b", "Morning"),
            t("5", 1, "Americano", "c", "Morning"),
        ];
        let summary = summarize(&data);
        let names: Vec<&str> = summary
            .top_overall()
            .iter()
            .map(ProductSales::coffee_name)
            .collect();
        assert_eq!(names, vec!["Mocha", "Latte", "Americano"]);
    }

    #[test]
    fn test_ranking_totals_are_rounded() {
        let data = vec![
            t("1.111", 1, "Latte", "a", "Morning"),
            t("1.111", 1, "Latte", "b", "Morning"),
        ];
        let top = summarize(&data).top_overall().to_vec();
        assert_eq!(top[0].total().value(), Decimal::from_str("2.22").unwrap());
    }

    #[test]
    fn test_slot_breakdowns_restrict_every_metric() {
        let result = summarize(&sample());
        let slots = result.slots();
        assert_eq!(slots.len(), 3);

        let morning = &slots[0];
        assert_eq!(morning.slot(), TimeSlot::Morning);
        assert_eq!(morning.total_sales().value(), Decimal::from(8));
        assert_eq!(morning.total_transactions(), 1);
        assert_eq!(morning.avg_value().value(), Decimal::from(8));
        assert_eq!(morning.top_sellers().len(), 1);
        assert_eq!(morning.top_sellers()[0].coffee_name(), "Latte");

        let afternoon = &slots[1];
        assert_eq!(afternoon.slot(), TimeSlot::Afternoon);
        assert_eq!(afternoon.total_sales().value(), Decimal::from(2));
        assert_eq!(afternoon.total_transactions(), 1);

        let night = &slots[2];
        assert_eq!(night.slot(), TimeSlot::Night);
        assert_eq!(night.total_sales().value(), Decimal::from(10));
        assert_eq!(night.top_sellers()[0].coffee_name(), "Espresso");
    }

    #[test]
    fn test_average_guards_division() {
        let no_ids: Vec<Transaction> = Vec::new();
        assert!(summarize(&no_ids).avg_value().is_zero());

        let data = vec![t("10", 1, "Latte", "a", "Morning")];
        assert_eq!(summarize(&data).avg_value().value(), Decimal::from(10));
    }
}

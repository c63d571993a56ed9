//! Presentation datasets derived from the aggregates.
//!
//! `DashboardView` is everything an external renderer needs for one dashboard
//! frame: formatted KPI strings, chart datasets with display colors, and table
//! rows. Like the aggregates it is rebuilt from scratch for every filter
//! change. `render_text` is the CLI's renderer.

use crate::aggregate::{self, ProductSales};
use crate::model::{FilterState, SalesData, TimeSlot};
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use std::fmt::Write;

/// Rendered in place of the peak slot when there are no slots at all.
pub const PEAK_NONE_STR: &str = "-";

/// Display colors for the known products, keyed by product name.
///
/// Presentation-only. Products missing from this table render with
/// `DEFAULT_COFFEE_COLOR`.
pub const COFFEE_COLORS: [(&str, &str); 8] = [
    ("Americano", "#6f4e37"),
    ("Americano with Milk", "#a9746e"),
    ("Cappuccino", "#c69c6d"),
    ("Cocoa", "#7b3f00"),
    ("Cortado", "#b5651d"),
    ("Espresso", "#4b2e2b"),
    ("Hot Chocolate", "#5d4037"),
    ("Latte", "#d2b48c"),
];

/// The color for products without an entry in `COFFEE_COLORS`.
pub const DEFAULT_COFFEE_COLOR: &str = "#8d6e63";

fn coffee_color(name: &str) -> &'static str {
    COFFEE_COLORS
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_COFFEE_COLOR)
}

/// The headline numbers, formatted for display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Kpis {
    total_sales: String,
    total_transactions: usize,
    avg_value: String,
    peak_time_of_day: String,
}

impl Kpis {
    pub fn total_sales(&self) -> &str {
        &self.total_sales
    }

    pub fn total_transactions(&self) -> usize {
        self.total_transactions
    }

    pub fn avg_value(&self) -> &str {
        &self.avg_value
    }

    pub fn peak_time_of_day(&self) -> &str {
        &self.peak_time_of_day
    }
}

/// One bar of the sales-by-time-of-day chart.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SlotPoint {
    slot: TimeSlot,
    value: f64,
}

impl SlotPoint {
    pub fn slot(&self) -> TimeSlot {
        self.slot
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

/// One ranked product: a table row and a chart bar at the same time.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ProductPoint {
    coffee_name: String,
    total: String,
    value: f64,
    color: String,
}

impl ProductPoint {
    fn from_sales(sales: &ProductSales) -> Self {
        Self {
            coffee_name: sales.coffee_name().to_string(),
            total: sales.total().to_string(),
            value: sales.total().value().to_f64().unwrap_or_default(),
            color: coffee_color(sales.coffee_name()).to_string(),
        }
    }

    pub fn coffee_name(&self) -> &str {
        &self.coffee_name
    }

    pub fn total(&self) -> &str {
        &self.total
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn color(&self) -> &str {
        &self.color
    }
}

/// The top sellers of one time slot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SlotTop {
    slot: TimeSlot,
    top_sellers: Vec<ProductPoint>,
}

impl SlotTop {
    pub fn slot(&self) -> TimeSlot {
        self.slot
    }

    pub fn top_sellers(&self) -> &[ProductPoint] {
        &self.top_sellers
    }
}

/// One row of the per-slot metrics table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SlotRow {
    slot: TimeSlot,
    sales: String,
    transactions: usize,
    avg: String,
}

impl SlotRow {
    pub fn slot(&self) -> TimeSlot {
        self.slot
    }

    pub fn sales(&self) -> &str {
        &self.sales
    }

    pub fn transactions(&self) -> usize {
        self.transactions
    }

    pub fn avg(&self) -> &str {
        &self.avg
    }
}

/// The complete presentation bundle for one (dataset, filter) pair.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DashboardView {
    filter: FilterState,
    kpis: Kpis,
    slot_chart: Vec<SlotPoint>,
    top_overall: Vec<ProductPoint>,
    top_by_slot: Vec<SlotTop>,
    slot_table: Vec<SlotRow>,
    coffee_options: Vec<String>,
}

impl DashboardView {
    /// Filters the dataset, aggregates the subset, and formats the results.
    ///
    /// The selector options always come from the full dataset, so narrowing
    /// the filter never removes entries from the product control.
    pub fn build(data: &SalesData, filter: &FilterState) -> Self {
        let subset = filter.apply(data.transactions());
        let result = aggregate::summarize(&subset);

        let kpis = Kpis {
            total_sales: result.total_sales().round_dp(2).to_string(),
            total_transactions: result.total_transactions(),
            avg_value: result.avg_value().to_string(),
            peak_time_of_day: result
                .peak_time_of_day()
                .map_or_else(|| PEAK_NONE_STR.to_string(), |slot| slot.to_string()),
        };

        let slot_chart = result
            .slots()
            .iter()
            .map(|b| SlotPoint {
                slot: b.slot(),
                value: b.total_sales().value().to_f64().unwrap_or_default(),
            })
            .collect();

        let top_by_slot = result
            .slots()
            .iter()
            .map(|b| SlotTop {
                slot: b.slot(),
                top_sellers: b.top_sellers().iter().map(ProductPoint::from_sales).collect(),
            })
            .collect();

        let slot_table = result
            .slots()
            .iter()
            .map(|b| SlotRow {
                slot: b.slot(),
                sales: b.total_sales().to_string(),
                transactions: b.total_transactions(),
                avg: b.avg_value().to_string(),
            })
            .collect();

        Self {
            filter: filter.clone(),
            kpis,
            slot_chart,
            top_overall: result
                .top_overall()
                .iter()
                .map(ProductPoint::from_sales)
                .collect(),
            top_by_slot,
            slot_table,
            coffee_options: data.coffee_options(),
        }
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn kpis(&self) -> &Kpis {
        &self.kpis
    }

    pub fn slot_chart(&self) -> &[SlotPoint] {
        &self.slot_chart
    }

    pub fn top_overall(&self) -> &[ProductPoint] {
        &self.top_overall
    }

    pub fn top_by_slot(&self) -> &[SlotTop] {
        &self.top_by_slot
    }

    pub fn slot_table(&self) -> &[SlotRow] {
        &self.slot_table
    }

    pub fn coffee_options(&self) -> &[String] {
        &self.coffee_options
    }

    /// The plain-text dashboard printed by the CLI.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Coffee Sales Dashboard");
        let _ = writeln!(
            out,
            "Filter: coffee={}, months {}..={}",
            self.filter.coffee(),
            self.filter.month_min(),
            self.filter.month_max()
        );
        let _ = writeln!(out);
        let _ = writeln!(out, "  Total sales       {}", self.kpis.total_sales);
        let _ = writeln!(out, "  Transactions      {}", self.kpis.total_transactions);
        let _ = writeln!(out, "  Average value     {}", self.kpis.avg_value);
        let _ = writeln!(out, "  Peak time of day  {}", self.kpis.peak_time_of_day);

        let _ = writeln!(out);
        let _ = writeln!(out, "Sales by time of day");
        for point in &self.slot_chart {
            let _ = writeln!(out, "  {:<10} {:.2}", point.slot.label(), point.value);
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "Top sellers");
        for (rank, product) in self.top_overall.iter().enumerate() {
            let _ = writeln!(
                out,
                "  {}. {:<20} {}",
                rank + 1,
                product.coffee_name,
                product.total
            );
        }

        for (row, top) in self.slot_table.iter().zip(&self.top_by_slot) {
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "{}: sales {}, transactions {}, avg {}",
                row.slot.label(),
                row.sales,
                row.transactions,
                row.avg
            );
            for (rank, product) in top.top_sellers.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "  {}. {:<20} {}",
                    rank + 1,
                    product.coffee_name,
                    product.total
                );
            }
        }
        out
    }
}

//! Derived analytics values.
//!
//! Everything here is recomputed on demand from the current inventory and
//! sales snapshots. Nothing is persisted or mutated in place; callers build a
//! fresh value, use it, and discard it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Income aggregate for a single calendar day.
///
/// `total_sales` is the day's revenue sum, not a transaction count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyIncome {
    pub date: NaiveDate,
    pub total_sales: f64,
    pub total_profit: f64,
    pub items_sold: i64,
}

/// One day of a date-bucketed series. Days without activity are still
/// represented, with every numeric field zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    /// Number of sale transactions on this day.
    pub sales: u32,
    pub revenue: f64,
    pub profit: f64,
    pub items_sold: i64,
}

/// Per-product sales aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPerformance {
    pub name: String,
    pub category: String,
    pub sold: i64,
    pub revenue: f64,
    pub profit: f64,
    /// Markup over cost in percent; zero when the cost price is zero.
    pub profit_margin: f64,
    pub stock: i64,
}

/// Revenue accumulated per category, with the number of inventory items in
/// that category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub category: String,
    pub revenue: f64,
    pub item_count: u32,
}

/// Headline metrics for the live dashboard. Totals cover the entire sales
/// history, independent of the chart window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub total_revenue: f64,
    pub total_profit: f64,
    pub total_items_sold: i64,
    pub total_transactions: u32,
    pub average_order_value: f64,
    /// Revenue change of the most recent half-window versus the one before
    /// it, in percent.
    pub revenue_growth: f64,
    pub profit_margin: f64,
}

/// Everything the live analytics view renders in one pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsOverview {
    pub summary: AnalyticsSummary,
    pub daily_series: Vec<DailySummary>,
    /// All inventory items, zero-sold ones included, best revenue first.
    pub product_performance: Vec<ProductPerformance>,
    /// Categories with revenue, for the distribution chart.
    pub category_chart_data: Vec<CategoryBreakdown>,
}

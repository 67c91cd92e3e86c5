//! The denormalized report document consumed by every export renderer.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::analytics::{DailySummary, ProductPerformance};
use super::inventory_item::InventoryItem;
use super::sale_record::SaleRecord;

/// Headline totals for the report window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_revenue: f64,
    pub total_profit: f64,
    /// Number of sale transactions in the window.
    pub total_sales: u32,
    pub total_items_sold: i64,
    pub profit_margin: f64,
}

/// A complete report over one inclusive date window.
///
/// Built fresh for every export, never cached. `daily_breakdown` covers every
/// day of the window including days with no activity; `product_performance`
/// only lists products with at least one unit sold in the window (the live
/// analytics view keeps zero-sold products — that difference is deliberate).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportData {
    pub business_name: String,
    pub report_date: NaiveDate,
    /// Human-readable window, e.g. "2024-01-01 to 2024-01-31".
    pub date_range: String,
    pub summary: ReportSummary,
    /// Sales within the window.
    pub sales_data: Vec<SaleRecord>,
    /// Full inventory snapshot at report time.
    pub inventory_data: Vec<InventoryItem>,
    pub daily_breakdown: Vec<DailySummary>,
    pub product_performance: Vec<ProductPerformance>,
}

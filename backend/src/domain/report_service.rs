//! Report assembly for the sales tracker.
//!
//! Combines the aggregation engine's outputs for an arbitrary date window
//! into one denormalized [`ReportData`] document that every export renderer
//! consumes. Assembly never mutates the store, and given the same store
//! contents and boundary dates the result is always the same.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use log::info;
use std::sync::Arc;

use crate::domain::analytics_service::{daily_series, product_performance, sale_profit};
use crate::domain::commands::reports::GenerateReportCommand;
use crate::domain::models::report::{ReportData, ReportSummary};
use crate::domain::models::sale_record::SaleRecord;
use crate::storage::traits::{Connection, InventoryStorage, SaleStorage};

/// Service assembling report documents from record-store snapshots.
#[derive(Clone)]
pub struct ReportService<C: Connection> {
    inventory_repository: C::InventoryRepository,
    sale_repository: C::SaleRepository,
}

impl<C: Connection> ReportService<C> {
    /// Create a new ReportService.
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            inventory_repository: connection.create_inventory_repository(),
            sale_repository: connection.create_sale_repository(),
        }
    }

    /// Assemble a report over the inclusive `[start_date, end_date]` window.
    ///
    /// The window is a precondition: the UI validates ordering before the
    /// command is built. The daily breakdown covers every day of the window
    /// including empty ones, while the product ranking drops products with
    /// nothing sold — reports only list products that moved.
    pub fn generate_report(&self, command: GenerateReportCommand) -> Result<ReportData> {
        let start = NaiveDate::parse_from_str(&command.start_date, "%Y-%m-%d")
            .context("Invalid report start date, expected YYYY-MM-DD")?;
        let end = NaiveDate::parse_from_str(&command.end_date, "%Y-%m-%d")
            .context("Invalid report end date, expected YYYY-MM-DD")?;
        let report_date = match &command.report_date {
            Some(date) => NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .context("Invalid report date, expected YYYY-MM-DD")?,
            None => Local::now().date_naive(),
        };

        let inventory = self.inventory_repository.list_items()?;
        let all_sales = self.sale_repository.list_sales()?;

        let sales_data: Vec<SaleRecord> = all_sales
            .into_iter()
            .filter(|sale| sale.date >= start && sale.date <= end)
            .collect();

        info!(
            "Assembling report for {}: {} to {}, {} sales in window",
            command.business_name,
            start,
            end,
            sales_data.len()
        );

        let total_revenue: f64 = sales_data.iter().map(|sale| sale.total_amount).sum();
        let total_profit: f64 = sales_data
            .iter()
            .map(|sale| sale_profit(sale, &inventory))
            .sum();
        let total_items_sold: i64 = sales_data.iter().map(|sale| sale.quantity_sold).sum();
        let profit_margin = if total_revenue > 0.0 {
            total_profit / total_revenue * 100.0
        } else {
            0.0
        };

        let daily_breakdown = daily_series(start, end, &sales_data, &inventory);

        let performance: Vec<_> = product_performance(&inventory, &sales_data)
            .into_iter()
            .filter(|product| product.sold > 0)
            .collect();

        Ok(ReportData {
            business_name: command.business_name,
            report_date,
            date_range: format!("{} to {}", start, end),
            summary: ReportSummary {
                total_revenue,
                total_profit,
                total_sales: sales_data.len() as u32,
                total_items_sold,
                profit_margin,
            },
            sales_data,
            inventory_data: inventory,
            daily_breakdown,
            product_performance: performance,
        })
    }
}

//! Aggregation engine for the sales tracker.
//!
//! Every computation here is a pure function over full snapshots of the
//! inventory and sales collections: the same inputs always produce the same
//! outputs, nothing is cached, and nothing is mutated. The service wrapper at
//! the bottom only supplies the snapshots from the record store.
//!
//! Profit is always derived against the item's *current* cost price, not a
//! historical snapshot. A sale whose item no longer exists counts toward
//! revenue and volume but contributes zero profit.

use anyhow::{Context, Result};
use chrono::{Duration, Local, NaiveDate};
use log::info;
use std::cmp::Ordering;
use std::sync::Arc;

use crate::domain::commands::analytics::AnalyticsQuery;
use crate::domain::models::analytics::{
    AnalyticsOverview, AnalyticsSummary, CategoryBreakdown, DailyIncome, DailySummary,
    ProductPerformance,
};
use crate::domain::models::inventory_item::InventoryItem;
use crate::domain::models::sale_record::SaleRecord;
use crate::storage::traits::{Connection, InventoryStorage, SaleStorage};

/// Profit contributed by one sale: margin over the item's current cost
/// price, or zero when the item no longer exists.
pub fn sale_profit(sale: &SaleRecord, inventory: &[InventoryItem]) -> f64 {
    match inventory.iter().find(|item| item.id == sale.item_id) {
        Some(item) => (sale.unit_price - item.cost_price) * sale.quantity_sold as f64,
        None => 0.0,
    }
}

/// Income aggregate for a single calendar day.
///
/// `total_sales` is the revenue sum for the day; a day with no sales yields
/// an all-zero value.
pub fn daily_income(date: NaiveDate, sales: &[SaleRecord], inventory: &[InventoryItem]) -> DailyIncome {
    let day_sales: Vec<&SaleRecord> = sales.iter().filter(|sale| sale.date == date).collect();

    let total_sales = day_sales.iter().map(|sale| sale.total_amount).sum();
    let items_sold = day_sales.iter().map(|sale| sale.quantity_sold).sum();
    let total_profit = day_sales
        .iter()
        .map(|sale| sale_profit(sale, inventory))
        .sum();

    DailyIncome {
        date,
        total_sales,
        total_profit,
        items_sold,
    }
}

/// One [`DailySummary`] per calendar day of the inclusive range, in
/// ascending order with no gaps. Days without sales are present with all
/// numeric fields zero, so charts and reports render a continuous series.
pub fn daily_series(
    start: NaiveDate,
    end: NaiveDate,
    sales: &[SaleRecord],
    inventory: &[InventoryItem],
) -> Vec<DailySummary> {
    let mut series = Vec::new();
    let mut day = start;

    while day <= end {
        let day_sales: Vec<&SaleRecord> = sales.iter().filter(|sale| sale.date == day).collect();
        let income = daily_income(day, sales, inventory);

        series.push(DailySummary {
            date: day,
            sales: day_sales.len() as u32,
            revenue: day_sales.iter().map(|sale| sale.total_amount).sum(),
            profit: income.total_profit,
            items_sold: day_sales.iter().map(|sale| sale.quantity_sold).sum(),
        });

        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }

    series
}

/// Per-item sales aggregate over the given sales set, best revenue first.
///
/// Every inventory item appears, including those with nothing sold; the
/// sort is stable, so revenue ties keep their inventory order. The profit
/// margin is the item's markup over cost, zero when the cost price is zero.
pub fn product_performance(
    inventory: &[InventoryItem],
    sales: &[SaleRecord],
) -> Vec<ProductPerformance> {
    let mut performance: Vec<ProductPerformance> = inventory
        .iter()
        .map(|item| {
            let item_sales: Vec<&SaleRecord> =
                sales.iter().filter(|sale| sale.item_id == item.id).collect();

            let sold = item_sales.iter().map(|sale| sale.quantity_sold).sum();
            let revenue = item_sales.iter().map(|sale| sale.total_amount).sum();
            let profit = item_sales
                .iter()
                .map(|sale| (sale.unit_price - item.cost_price) * sale.quantity_sold as f64)
                .sum();
            let profit_margin = if item.cost_price > 0.0 {
                (item.selling_price - item.cost_price) / item.cost_price * 100.0
            } else {
                0.0
            };

            ProductPerformance {
                name: item.name.clone(),
                category: item.category.clone(),
                sold,
                revenue,
                profit,
                profit_margin,
                stock: item.quantity,
            }
        })
        .collect();

    performance.sort_by(|a, b| b.revenue.partial_cmp(&a.revenue).unwrap_or(Ordering::Equal));
    performance
}

/// Revenue grouped by category string (case-sensitive, exact match), in
/// first-seen inventory order. Every category is returned with its item
/// count, whether or not it earned revenue.
pub fn category_breakdown(
    inventory: &[InventoryItem],
    sales: &[SaleRecord],
) -> Vec<CategoryBreakdown> {
    let mut breakdown: Vec<CategoryBreakdown> = Vec::new();

    for item in inventory {
        let item_revenue: f64 = sales
            .iter()
            .filter(|sale| sale.item_id == item.id)
            .map(|sale| sale.total_amount)
            .sum();

        match breakdown.iter_mut().find(|entry| entry.category == item.category) {
            Some(entry) => {
                entry.revenue += item_revenue;
                entry.item_count += 1;
            }
            None => breakdown.push(CategoryBreakdown {
                category: item.category.clone(),
                revenue: item_revenue,
                item_count: 1,
            }),
        }
    }

    breakdown
}

/// Categories that actually earned revenue, for the distribution chart.
pub fn category_chart_data(breakdown: &[CategoryBreakdown]) -> Vec<CategoryBreakdown> {
    breakdown
        .iter()
        .filter(|entry| entry.revenue > 0.0)
        .cloned()
        .collect()
}

/// Revenue change of the most recent half-window against the one before it,
/// in percent.
///
/// Both half-windows are `min(window_days / 2, 7)` days long and end at
/// `today`: recent covers `(today - h, ...]`, previous covers
/// `(today - 2h, today - h]`. Zero previous revenue yields zero growth.
pub fn period_growth(sales: &[SaleRecord], today: NaiveDate, window_days: u32) -> f64 {
    let half = std::cmp::min(window_days / 2, 7) as i64;
    let recent_cutoff = today - Duration::days(half);
    let previous_cutoff = today - Duration::days(2 * half);

    let recent_revenue: f64 = sales
        .iter()
        .filter(|sale| sale.date > recent_cutoff)
        .map(|sale| sale.total_amount)
        .sum();
    let previous_revenue: f64 = sales
        .iter()
        .filter(|sale| sale.date > previous_cutoff && sale.date <= recent_cutoff)
        .map(|sale| sale.total_amount)
        .sum();

    if previous_revenue > 0.0 {
        (recent_revenue - previous_revenue) / previous_revenue * 100.0
    } else {
        0.0
    }
}

/// Service supplying record-store snapshots to the aggregation functions.
#[derive(Clone)]
pub struct AnalyticsService<C: Connection> {
    inventory_repository: C::InventoryRepository,
    sale_repository: C::SaleRepository,
}

impl<C: Connection> AnalyticsService<C> {
    /// Create a new AnalyticsService.
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            inventory_repository: connection.create_inventory_repository(),
            sale_repository: connection.create_sale_repository(),
        }
    }

    /// Income aggregate for one calendar day (`YYYY-MM-DD`), recomputed from
    /// the current snapshots.
    pub fn calculate_daily_income(&self, date: &str) -> Result<DailyIncome> {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .context("Invalid date, expected YYYY-MM-DD")?;

        let sales = self.sale_repository.list_sales()?;
        let inventory = self.inventory_repository.list_items()?;

        Ok(daily_income(date, &sales, &inventory))
    }

    /// Daily series over an inclusive date range (`YYYY-MM-DD` bounds).
    pub fn build_daily_series(&self, start_date: &str, end_date: &str) -> Result<Vec<DailySummary>> {
        let start = NaiveDate::parse_from_str(start_date, "%Y-%m-%d")
            .context("Invalid start date, expected YYYY-MM-DD")?;
        let end = NaiveDate::parse_from_str(end_date, "%Y-%m-%d")
            .context("Invalid end date, expected YYYY-MM-DD")?;

        let sales = self.sale_repository.list_sales()?;
        let inventory = self.inventory_repository.list_items()?;

        Ok(daily_series(start, end, &sales, &inventory))
    }

    /// The full live-dashboard aggregate for a chart window ending today.
    ///
    /// Headline totals always cover the entire sales history; only the daily
    /// series is limited to the window. Zero-sold products stay in the
    /// ranking here, unlike in exported reports.
    pub fn overview(&self, query: AnalyticsQuery) -> Result<AnalyticsOverview> {
        if query.window_days == 0 {
            return Err(anyhow::anyhow!("Analytics window must be at least one day"));
        }

        let today = match &query.today {
            Some(date) => NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .context("Invalid reference date, expected YYYY-MM-DD")?,
            None => Local::now().date_naive(),
        };

        let sales = self.sale_repository.list_sales()?;
        let inventory = self.inventory_repository.list_items()?;

        info!(
            "Computing analytics overview: {} day window, {} sales, {} items",
            query.window_days,
            sales.len(),
            inventory.len()
        );

        let window_start = today - Duration::days(query.window_days as i64 - 1);
        let series = daily_series(window_start, today, &sales, &inventory);

        let total_revenue: f64 = sales.iter().map(|sale| sale.total_amount).sum();
        let total_profit: f64 = sales.iter().map(|sale| sale_profit(sale, &inventory)).sum();
        let total_items_sold: i64 = sales.iter().map(|sale| sale.quantity_sold).sum();
        let average_order_value = if sales.is_empty() {
            0.0
        } else {
            total_revenue / sales.len() as f64
        };
        let profit_margin = if total_revenue > 0.0 {
            total_profit / total_revenue * 100.0
        } else {
            0.0
        };

        Ok(AnalyticsOverview {
            summary: AnalyticsSummary {
                total_revenue,
                total_profit,
                total_items_sold,
                total_transactions: sales.len() as u32,
                average_order_value,
                revenue_growth: period_growth(&sales, today, query.window_days),
                profit_margin,
            },
            daily_series: series,
            product_performance: product_performance(&inventory, &sales),
            category_chart_data: category_chart_data(&category_breakdown(&inventory, &sales)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::json::test_utils::{test_item, test_sale};
    use crate::storage::json::JsonConnection;
    use crate::storage::traits::{InventoryStorage, SaleStorage};
    use tempfile::TempDir;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_daily_income_scenario() {
        // Item at cost 10, price 20; three units sold on one day.
        let inventory = vec![test_item("item::1", "Widget", 10.0, 20.0, 100, "Gadgets")];
        let sales = vec![test_sale("sale::1", "item::1", "Widget", 3, 20.0, "2024-01-01")];

        let income = daily_income(date("2024-01-01"), &sales, &inventory);

        assert_eq!(income.date, date("2024-01-01"));
        assert_eq!(income.total_sales, 60.0);
        assert_eq!(income.total_profit, 30.0);
        assert_eq!(income.items_sold, 3);
    }

    #[test]
    fn test_daily_income_day_without_sales_is_all_zero() {
        let inventory = vec![test_item("item::1", "Widget", 10.0, 20.0, 100, "Gadgets")];
        let sales = vec![test_sale("sale::1", "item::1", "Widget", 3, 20.0, "2024-01-01")];

        let income = daily_income(date("2024-03-15"), &sales, &inventory);

        assert_eq!(
            income,
            DailyIncome {
                date: date("2024-03-15"),
                total_sales: 0.0,
                total_profit: 0.0,
                items_sold: 0,
            }
        );
    }

    #[test]
    fn test_daily_income_dangling_item_counts_revenue_but_no_profit() {
        let inventory = vec![test_item("item::1", "Widget", 10.0, 20.0, 100, "Gadgets")];
        let sales = vec![
            test_sale("sale::1", "item::1", "Widget", 2, 20.0, "2024-01-01"),
            test_sale("sale::2", "item::gone", "Removed", 5, 8.0, "2024-01-01"),
        ];

        let income = daily_income(date("2024-01-01"), &sales, &inventory);

        assert_eq!(income.total_sales, 80.0);
        assert_eq!(income.total_profit, 20.0);
        assert_eq!(income.items_sold, 7);
    }

    #[test]
    fn test_daily_income_uses_current_cost_price() {
        let mut item = test_item("item::1", "Widget", 10.0, 20.0, 100, "Gadgets");
        let sales = vec![test_sale("sale::1", "item::1", "Widget", 3, 20.0, "2024-01-01")];

        // The cost has since risen; profit reflects the current value.
        item.cost_price = 15.0;
        let income = daily_income(date("2024-01-01"), &sales, &[item]);

        assert_eq!(income.total_profit, 15.0);
    }

    #[test]
    fn test_daily_series_covers_every_day_inclusive() {
        let inventory = vec![test_item("item::1", "Widget", 10.0, 20.0, 100, "Gadgets")];
        let sales = vec![
            test_sale("sale::1", "item::1", "Widget", 1, 20.0, "2024-01-01"),
            test_sale("sale::2", "item::1", "Widget", 2, 20.0, "2024-01-04"),
        ];

        let series = daily_series(date("2024-01-01"), date("2024-01-05"), &sales, &inventory);

        assert_eq!(series.len(), 5);
        for (i, day) in series.iter().enumerate() {
            assert_eq!(day.date, date("2024-01-01") + Duration::days(i as i64));
        }

        assert_eq!(series[0].sales, 1);
        assert_eq!(series[0].revenue, 20.0);
        // Zero-activity days are present with zeroed fields.
        assert_eq!(series[1].sales, 0);
        assert_eq!(series[1].revenue, 0.0);
        assert_eq!(series[1].items_sold, 0);
        assert_eq!(series[3].items_sold, 2);
    }

    #[test]
    fn test_daily_series_single_day_range() {
        let series = daily_series(date("2024-01-01"), date("2024-01-01"), &[], &[]);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].date, date("2024-01-01"));
    }

    #[test]
    fn test_product_performance_sorts_by_revenue_with_stable_ties() {
        let inventory = vec![
            test_item("item::a", "Alpha", 5.0, 10.0, 10, "One"),
            test_item("item::b", "Beta", 5.0, 10.0, 10, "One"),
            test_item("item::c", "Gamma", 5.0, 10.0, 10, "Two"),
        ];
        // Alpha and Beta tie at 50.0 revenue; Gamma trails at 30.0.
        let sales = vec![
            test_sale("sale::1", "item::a", "Alpha", 5, 10.0, "2024-01-01"),
            test_sale("sale::2", "item::b", "Beta", 5, 10.0, "2024-01-02"),
            test_sale("sale::3", "item::c", "Gamma", 3, 10.0, "2024-01-03"),
        ];

        let ranked = product_performance(&inventory, &sales);

        let names: Vec<&str> = ranked.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Beta", "Gamma"]);
        assert_eq!(ranked[0].revenue, 50.0);
        assert_eq!(ranked[2].revenue, 30.0);
    }

    #[test]
    fn test_product_performance_keeps_zero_sold_items() {
        let inventory = vec![
            test_item("item::a", "Alpha", 5.0, 10.0, 10, "One"),
            test_item("item::b", "Beta", 5.0, 10.0, 7, "One"),
        ];
        let sales = vec![test_sale("sale::1", "item::a", "Alpha", 2, 10.0, "2024-01-01")];

        let ranked = product_performance(&inventory, &sales);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[1].name, "Beta");
        assert_eq!(ranked[1].sold, 0);
        assert_eq!(ranked[1].revenue, 0.0);
        assert_eq!(ranked[1].stock, 7);
    }

    #[test]
    fn test_product_performance_zero_cost_price_has_zero_margin() {
        let inventory = vec![test_item("item::a", "Freebie", 0.0, 5.0, 10, "One")];

        let ranked = product_performance(&inventory, &[]);

        assert_eq!(ranked[0].profit_margin, 0.0);
        assert!(ranked[0].profit_margin.is_finite());
    }

    #[test]
    fn test_product_performance_margin_formula() {
        let inventory = vec![test_item("item::a", "Widget", 10.0, 25.0, 10, "One")];

        let ranked = product_performance(&inventory, &[]);

        assert_eq!(ranked[0].profit_margin, 150.0);
    }

    #[test]
    fn test_category_breakdown_groups_case_sensitively() {
        let inventory = vec![
            test_item("item::a", "Alpha", 5.0, 10.0, 10, "Drinks"),
            test_item("item::b", "Beta", 5.0, 10.0, 10, "drinks"),
            test_item("item::c", "Gamma", 5.0, 10.0, 10, "Drinks"),
        ];
        let sales = vec![
            test_sale("sale::1", "item::a", "Alpha", 1, 10.0, "2024-01-01"),
            test_sale("sale::2", "item::b", "Beta", 2, 10.0, "2024-01-01"),
        ];

        let breakdown = category_breakdown(&inventory, &sales);

        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].category, "Drinks");
        assert_eq!(breakdown[0].revenue, 10.0);
        assert_eq!(breakdown[0].item_count, 2);
        assert_eq!(breakdown[1].category, "drinks");
        assert_eq!(breakdown[1].revenue, 20.0);
        assert_eq!(breakdown[1].item_count, 1);
    }

    #[test]
    fn test_category_chart_data_drops_zero_revenue_categories() {
        let inventory = vec![
            test_item("item::a", "Alpha", 5.0, 10.0, 10, "Drinks"),
            test_item("item::b", "Beta", 5.0, 10.0, 10, "Snacks"),
        ];
        let sales = vec![test_sale("sale::1", "item::a", "Alpha", 1, 10.0, "2024-01-01")];

        let breakdown = category_breakdown(&inventory, &sales);
        let chart = category_chart_data(&breakdown);

        // Both categories are counted, only one makes the chart.
        assert_eq!(breakdown.len(), 2);
        assert_eq!(chart.len(), 1);
        assert_eq!(chart[0].category, "Drinks");
    }

    #[test]
    fn test_period_growth() {
        // Window of 14 days -> 7-day halves. Recent: after 2024-01-03.
        let sales = vec![
            test_sale("sale::1", "item::1", "Widget", 1, 100.0, "2024-01-05"),
            test_sale("sale::2", "item::1", "Widget", 1, 150.0, "2024-01-09"),
            test_sale("sale::3", "item::1", "Widget", 1, 100.0, "2023-12-29"),
            test_sale("sale::4", "item::1", "Widget", 1, 100.0, "2024-01-02"),
        ];

        let growth = period_growth(&sales, date("2024-01-10"), 14);

        // 250 recent vs 200 previous.
        assert_eq!(growth, 25.0);
    }

    #[test]
    fn test_period_growth_zero_previous_revenue_is_zero() {
        let sales = vec![test_sale("sale::1", "item::1", "Widget", 1, 100.0, "2024-01-09")];

        let growth = period_growth(&sales, date("2024-01-10"), 14);

        assert_eq!(growth, 0.0);
    }

    #[test]
    fn test_period_growth_half_window_is_capped_at_seven_days() {
        // 90-day window caps the halves at 7 days, so a sale 10 days back
        // falls in the previous half, not the recent one.
        let sales = vec![
            test_sale("sale::1", "item::1", "Widget", 1, 100.0, "2024-01-01"),
            test_sale("sale::2", "item::1", "Widget", 1, 300.0, "2024-01-10"),
        ];

        let growth = period_growth(&sales, date("2024-01-11"), 90);

        assert_eq!(growth, 200.0);
    }

    fn setup_service() -> (AnalyticsService<JsonConnection>, Arc<JsonConnection>, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = Arc::new(JsonConnection::new(temp_dir.path()).unwrap());
        (AnalyticsService::new(connection.clone()), connection, temp_dir)
    }

    #[test]
    fn test_calculate_daily_income_from_store() {
        let (service, connection, _temp_dir) = setup_service();
        let inventory = connection.create_inventory_repository();
        let sales = connection.create_sale_repository();

        inventory
            .store_item(&test_item("item::1", "Widget", 10.0, 20.0, 100, "Gadgets"))
            .unwrap();
        sales
            .store_sale(&test_sale("sale::1", "item::1", "Widget", 3, 20.0, "2024-01-01"))
            .unwrap();

        let income = service.calculate_daily_income("2024-01-01").unwrap();

        assert_eq!(income.total_sales, 60.0);
        assert_eq!(income.total_profit, 30.0);
        assert_eq!(income.items_sold, 3);
    }

    #[test]
    fn test_build_daily_series_from_store() {
        let (service, connection, _temp_dir) = setup_service();
        let sales = connection.create_sale_repository();
        sales
            .store_sale(&test_sale("sale::1", "item::1", "Widget", 2, 20.0, "2024-01-02"))
            .unwrap();

        let series = service.build_daily_series("2024-01-01", "2024-01-03").unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series[1].revenue, 40.0);
        assert!(service.build_daily_series("2024-01-01", "bad-date").is_err());
    }

    #[test]
    fn test_overview_summary_covers_all_sales() {
        let (service, connection, _temp_dir) = setup_service();
        let inventory = connection.create_inventory_repository();
        let sales = connection.create_sale_repository();

        inventory
            .store_item(&test_item("item::1", "Widget", 10.0, 20.0, 100, "Gadgets"))
            .unwrap();
        // One sale inside the 7-day window, one far outside it.
        sales
            .store_sale(&test_sale("sale::1", "item::1", "Widget", 2, 20.0, "2024-06-09"))
            .unwrap();
        sales
            .store_sale(&test_sale("sale::2", "item::1", "Widget", 1, 20.0, "2023-01-01"))
            .unwrap();

        let overview = service
            .overview(AnalyticsQuery {
                window_days: 7,
                today: Some("2024-06-10".to_string()),
            })
            .unwrap();

        assert_eq!(overview.summary.total_revenue, 60.0);
        assert_eq!(overview.summary.total_items_sold, 3);
        assert_eq!(overview.summary.total_transactions, 2);
        assert_eq!(overview.summary.average_order_value, 30.0);
        assert_eq!(overview.daily_series.len(), 7);
        assert_eq!(overview.daily_series.last().unwrap().date, date("2024-06-10"));
        assert_eq!(overview.product_performance.len(), 1);
        assert_eq!(overview.category_chart_data.len(), 1);
    }

    #[test]
    fn test_overview_with_empty_store() {
        let (service, _connection, _temp_dir) = setup_service();

        let overview = service
            .overview(AnalyticsQuery {
                window_days: 30,
                today: Some("2024-06-10".to_string()),
            })
            .unwrap();

        assert_eq!(overview.summary.total_revenue, 0.0);
        assert_eq!(overview.summary.average_order_value, 0.0);
        assert_eq!(overview.summary.revenue_growth, 0.0);
        assert_eq!(overview.summary.profit_margin, 0.0);
        assert_eq!(overview.daily_series.len(), 30);
        assert!(overview.product_performance.is_empty());
        assert!(overview.category_chart_data.is_empty());
    }

    #[test]
    fn test_overview_rejects_zero_window() {
        let (service, _connection, _temp_dir) = setup_service();

        let result = service.overview(AnalyticsQuery {
            window_days: 0,
            today: Some("2024-06-10".to_string()),
        });

        assert!(result.is_err());
    }
}

//! Builders for storage-layer tests.

use chrono::{NaiveDate, TimeZone, Utc};

use crate::domain::models::inventory_item::InventoryItem;
use crate::domain::models::sale_record::SaleRecord;

/// Build an inventory item with fixed timestamps.
pub fn test_item(
    id: &str,
    name: &str,
    cost_price: f64,
    selling_price: f64,
    quantity: i64,
    category: &str,
) -> InventoryItem {
    let created = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
    InventoryItem {
        id: id.to_string(),
        name: name.to_string(),
        cost_price,
        selling_price,
        quantity,
        category: category.to_string(),
        created_at: created,
        updated_at: created,
    }
}

/// Build a sale record for `quantity_sold` units at `unit_price` on `date`
/// (`YYYY-MM-DD`).
pub fn test_sale(
    id: &str,
    item_id: &str,
    item_name: &str,
    quantity_sold: i64,
    unit_price: f64,
    date: &str,
) -> SaleRecord {
    SaleRecord {
        id: id.to_string(),
        item_id: item_id.to_string(),
        item_name: item_name.to_string(),
        quantity_sold,
        unit_price,
        total_amount: unit_price * quantity_sold as f64,
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
    }
}

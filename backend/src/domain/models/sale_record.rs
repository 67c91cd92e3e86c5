//! Domain model for a recorded sale.
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One sale transaction. Immutable once recorded: there is no update or
/// delete operation for sales.
///
/// `item_id` is a soft reference — the item may be deleted later, and
/// aggregation then counts the sale's revenue but contributes zero profit.
/// `total_amount` and `item_name` are captured at recording time and never
/// recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub id: String,
    pub item_id: String,
    pub item_name: String,
    pub quantity_sold: i64,
    pub unit_price: f64,
    pub total_amount: f64,
    /// Calendar day the sale happened on, used for all date bucketing.
    pub date: NaiveDate,
    /// Full timestamp of when the record was created, used for ordering.
    pub created_at: DateTime<Utc>,
}

impl SaleRecord {
    /// Generate a unique sale ID from a creation timestamp.
    /// Format: `sale::<epoch_millis>`
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("sale::{}", epoch_millis)
    }

    /// Parse a sale ID to extract its creation timestamp.
    pub fn parse_id(id: &str) -> Result<u64, String> {
        let parts: Vec<&str> = id.split("::").collect();
        if parts.len() != 2 || parts[0] != "sale" {
            return Err(format!("Invalid sale ID format: {}", id));
        }
        parts[1]
            .parse::<u64>()
            .map_err(|_| format!("Invalid timestamp in sale ID: {}", parts[1]))
    }
}

/// Validation failures when recording a sale.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum SaleValidationError {
    #[error("Quantity sold must be positive")]
    NonPositiveQuantity,
    #[error("Insufficient stock for {item_name}: {available} available, {requested} requested")]
    InsufficientStock {
        item_name: String,
        available: i64,
        requested: i64,
    },
}

//! Domain model for an inventory item.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stocked product. `quantity` is decremented whenever a sale is recorded
/// against the item; edits overwrite every field except `id`/`created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub cost_price: f64,
    pub selling_price: f64,
    pub quantity: i64,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InventoryItem {
    /// Generate a unique item ID from a creation timestamp.
    /// Format: `item::<epoch_millis>`
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("item::{}", epoch_millis)
    }

    /// Parse an item ID to extract its creation timestamp.
    pub fn parse_id(id: &str) -> Result<u64, String> {
        let parts: Vec<&str> = id.split("::").collect();
        if parts.len() != 2 || parts[0] != "item" {
            return Err(format!("Invalid item ID format: {}", id));
        }
        parts[1]
            .parse::<u64>()
            .map_err(|_| format!("Invalid timestamp in item ID: {}", parts[1]))
    }
}

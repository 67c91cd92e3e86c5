//! # Storage Traits
//!
//! Storage abstractions that keep the domain layer independent of the
//! concrete persistence format. Services are generic over [`Connection`], so
//! tests can instantiate isolated stores and alternative backends can be
//! swapped in without touching domain code.

use anyhow::Result;

use crate::domain::models::inventory_item::InventoryItem;
use crate::domain::models::sale_record::SaleRecord;

/// Interface for inventory item storage operations.
///
/// Lookups by id return `Option`, never an error, for missing records.
pub trait InventoryStorage: Send + Sync {
    /// Store a new inventory item.
    fn store_item(&self, item: &InventoryItem) -> Result<()>;

    /// Retrieve a specific item by ID.
    fn get_item(&self, item_id: &str) -> Result<Option<InventoryItem>>;

    /// List all inventory items in creation order.
    fn list_items(&self) -> Result<Vec<InventoryItem>>;

    /// Overwrite an existing item.
    fn update_item(&self, item: &InventoryItem) -> Result<()>;

    /// Delete an item by ID.
    /// Returns true if the item was found and deleted, false otherwise.
    fn delete_item(&self, item_id: &str) -> Result<bool>;

    /// Reduce an item's quantity by `by`. Silently does nothing when the
    /// item no longer exists.
    fn decrement_quantity(&self, item_id: &str, by: i64) -> Result<()>;
}

/// Interface for sale record storage operations.
///
/// Sales are append-only: once stored, a record is never updated or deleted.
pub trait SaleStorage: Send + Sync {
    /// Append a sale record and decrement the referenced item's quantity.
    /// The decrement is a silent no-op when the item no longer exists.
    fn store_sale(&self, sale: &SaleRecord) -> Result<()>;

    /// Retrieve a specific sale by ID.
    fn get_sale(&self, sale_id: &str) -> Result<Option<SaleRecord>>;

    /// List all sale records in recording order.
    fn list_sales(&self) -> Result<Vec<SaleRecord>>;
}

/// Interface for storage connections.
///
/// Abstracts the concrete backing store and provides factory methods for
/// creating repositories, so the domain layer can work with any backend
/// without knowing the implementation details.
pub trait Connection: Send + Sync + Clone {
    /// The type of InventoryStorage this connection creates.
    type InventoryRepository: InventoryStorage + Clone;

    /// The type of SaleStorage this connection creates.
    type SaleRepository: SaleStorage + Clone;

    /// Create a new inventory repository for this connection.
    fn create_inventory_repository(&self) -> Self::InventoryRepository;

    /// Create a new sale repository for this connection.
    fn create_sale_repository(&self) -> Self::SaleRepository;
}

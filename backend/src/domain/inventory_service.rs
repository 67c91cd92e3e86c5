//! Inventory management service.
use anyhow::Result;
use chrono::Utc;
use log::{info, warn};
use std::sync::Arc;

use crate::domain::commands::inventory::{
    CreateInventoryItemCommand, CreateInventoryItemResult, DeleteInventoryItemCommand,
    DeleteInventoryItemResult, GetInventoryItemCommand, GetInventoryItemResult,
    ListInventoryResult, UpdateInventoryItemCommand, UpdateInventoryItemResult,
};
use crate::domain::models::inventory_item::InventoryItem;
use crate::storage::traits::{Connection, InventoryStorage};

/// Service for managing the inventory collection.
#[derive(Clone)]
pub struct InventoryService<C: Connection> {
    inventory_repository: C::InventoryRepository,
}

impl<C: Connection> InventoryService<C> {
    /// Create a new InventoryService.
    pub fn new(connection: Arc<C>) -> Self {
        let inventory_repository = connection.create_inventory_repository();
        Self {
            inventory_repository,
        }
    }

    /// Create a new inventory item with a fresh id and timestamps.
    pub fn create_item(
        &self,
        command: CreateInventoryItemCommand,
    ) -> Result<CreateInventoryItemResult> {
        info!("Creating inventory item: name={}", command.name);

        self.validate_create_command(&command)?;

        let now = Utc::now();
        let item = InventoryItem {
            id: InventoryItem::generate_id(now.timestamp_millis() as u64),
            name: command.name.trim().to_string(),
            cost_price: command.cost_price,
            selling_price: command.selling_price,
            quantity: command.quantity,
            category: command.category.trim().to_string(),
            created_at: now,
            updated_at: now,
        };

        self.inventory_repository.store_item(&item)?;

        info!("Created inventory item: {} with ID: {}", item.name, item.id);

        Ok(CreateInventoryItemResult { item })
    }

    /// Get a single item by ID.
    pub fn get_item(&self, command: GetInventoryItemCommand) -> Result<GetInventoryItemResult> {
        let item = self.inventory_repository.get_item(&command.item_id)?;

        if item.is_none() {
            warn!("Inventory item not found: {}", command.item_id);
        }

        Ok(GetInventoryItemResult { item })
    }

    /// List the full inventory in creation order.
    pub fn list_inventory(&self) -> Result<ListInventoryResult> {
        let items = self.inventory_repository.list_items()?;
        info!("Listed {} inventory items", items.len());
        Ok(ListInventoryResult { items })
    }

    /// Update the given fields of an existing item, refreshing `updated_at`.
    ///
    /// An unknown id yields `item: None` rather than an error.
    pub fn update_item(
        &self,
        command: UpdateInventoryItemCommand,
    ) -> Result<UpdateInventoryItemResult> {
        info!("Updating inventory item: {}", command.item_id);

        let mut item = match self.inventory_repository.get_item(&command.item_id)? {
            Some(item) => item,
            None => {
                warn!("Update requested for unknown inventory item: {}", command.item_id);
                return Ok(UpdateInventoryItemResult { item: None });
            }
        };

        self.validate_update_command(&command)?;

        if let Some(name) = command.name {
            item.name = name.trim().to_string();
        }
        if let Some(cost_price) = command.cost_price {
            item.cost_price = cost_price;
        }
        if let Some(selling_price) = command.selling_price {
            item.selling_price = selling_price;
        }
        if let Some(quantity) = command.quantity {
            item.quantity = quantity;
        }
        if let Some(category) = command.category {
            item.category = category.trim().to_string();
        }
        item.updated_at = Utc::now();

        self.inventory_repository.update_item(&item)?;

        info!("Updated inventory item: {} with ID: {}", item.name, item.id);

        Ok(UpdateInventoryItemResult { item: Some(item) })
    }

    /// Delete an item. `deleted` is false when the id was absent.
    pub fn delete_item(
        &self,
        command: DeleteInventoryItemCommand,
    ) -> Result<DeleteInventoryItemResult> {
        info!("Deleting inventory item: {}", command.item_id);

        let deleted = self.inventory_repository.delete_item(&command.item_id)?;

        if deleted {
            info!("Deleted inventory item: {}", command.item_id);
        } else {
            warn!("Delete requested for unknown inventory item: {}", command.item_id);
        }

        Ok(DeleteInventoryItemResult { deleted })
    }

    fn validate_create_command(&self, command: &CreateInventoryItemCommand) -> Result<()> {
        if command.name.trim().is_empty() {
            return Err(anyhow::anyhow!("Item name cannot be empty"));
        }
        if command.category.trim().is_empty() {
            return Err(anyhow::anyhow!("Item category cannot be empty"));
        }
        self.validate_prices_and_quantity(
            Some(command.cost_price),
            Some(command.selling_price),
            Some(command.quantity),
        )
    }

    fn validate_update_command(&self, command: &UpdateInventoryItemCommand) -> Result<()> {
        if let Some(ref name) = command.name {
            if name.trim().is_empty() {
                return Err(anyhow::anyhow!("Item name cannot be empty"));
            }
        }
        if let Some(ref category) = command.category {
            if category.trim().is_empty() {
                return Err(anyhow::anyhow!("Item category cannot be empty"));
            }
        }
        self.validate_prices_and_quantity(command.cost_price, command.selling_price, command.quantity)
    }

    fn validate_prices_and_quantity(
        &self,
        cost_price: Option<f64>,
        selling_price: Option<f64>,
        quantity: Option<i64>,
    ) -> Result<()> {
        if let Some(cost) = cost_price {
            if !cost.is_finite() || cost < 0.0 {
                return Err(anyhow::anyhow!("Cost price must be a non-negative number"));
            }
        }
        if let Some(price) = selling_price {
            if !price.is_finite() || price < 0.0 {
                return Err(anyhow::anyhow!("Selling price must be a non-negative number"));
            }
        }
        if let Some(quantity) = quantity {
            if quantity < 0 {
                return Err(anyhow::anyhow!("Quantity cannot be negative"));
            }
        }
        Ok(())
    }
}

//! Sale recording service.
use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use log::{info, warn};
use std::sync::Arc;

use crate::domain::commands::sales::{ListSalesResult, RecordSaleCommand, RecordSaleResult};
use crate::domain::models::sale_record::{SaleRecord, SaleValidationError};
use crate::storage::traits::{Connection, InventoryStorage, SaleStorage};

/// Service for recording and listing sales.
///
/// Recording a sale is the only non-idempotent write in the tracker besides
/// item creation: each call appends a new permanent record and decrements the
/// sold item's stock. Sales are never updated or deleted.
#[derive(Clone)]
pub struct SalesService<C: Connection> {
    sale_repository: C::SaleRepository,
    inventory_repository: C::InventoryRepository,
}

impl<C: Connection> SalesService<C> {
    /// Create a new SalesService.
    pub fn new(connection: Arc<C>) -> Self {
        let sale_repository = connection.create_sale_repository();
        let inventory_repository = connection.create_inventory_repository();
        Self {
            sale_repository,
            inventory_repository,
        }
    }

    /// Record a sale against an inventory item.
    ///
    /// The unit price and denormalized item name are captured from the item
    /// at recording time, and `total_amount` is computed once here. Selling
    /// more units than are in stock is rejected with
    /// [`SaleValidationError::InsufficientStock`].
    pub fn record_sale(&self, command: RecordSaleCommand) -> Result<RecordSaleResult> {
        info!(
            "Recording sale: item_id={}, quantity={}",
            command.item_id, command.quantity_sold
        );

        if command.quantity_sold <= 0 {
            return Err(SaleValidationError::NonPositiveQuantity.into());
        }

        let date = NaiveDate::parse_from_str(&command.date, "%Y-%m-%d")
            .context("Invalid sale date, expected YYYY-MM-DD")?;

        let item = self
            .inventory_repository
            .get_item(&command.item_id)?
            .ok_or_else(|| anyhow::anyhow!("Inventory item not found: {}", command.item_id))?;

        if command.quantity_sold > item.quantity {
            warn!(
                "Rejecting oversell of {}: {} in stock, {} requested",
                item.name, item.quantity, command.quantity_sold
            );
            return Err(SaleValidationError::InsufficientStock {
                item_name: item.name,
                available: item.quantity,
                requested: command.quantity_sold,
            }
            .into());
        }

        let now = Utc::now();
        let sale = SaleRecord {
            id: SaleRecord::generate_id(now.timestamp_millis() as u64),
            item_id: item.id.clone(),
            item_name: item.name.clone(),
            quantity_sold: command.quantity_sold,
            unit_price: item.selling_price,
            total_amount: item.selling_price * command.quantity_sold as f64,
            date,
            created_at: now,
        };

        // The repository appends the record and decrements the item's stock.
        self.sale_repository.store_sale(&sale)?;

        let success_message = format!(
            "Sold {} units of {} for {:.2}",
            sale.quantity_sold, sale.item_name, sale.total_amount
        );
        info!("Recorded sale {} ({})", sale.id, success_message);

        Ok(RecordSaleResult {
            sale,
            success_message,
        })
    }

    /// List all sales in recording order.
    pub fn list_sales(&self) -> Result<ListSalesResult> {
        let sales = self.sale_repository.list_sales()?;
        info!("Listed {} sale records", sales.len());
        Ok(ListSalesResult { sales })
    }
}

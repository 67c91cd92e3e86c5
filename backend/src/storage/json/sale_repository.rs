use anyhow::Result;
use log::debug;
use std::fs;

use super::connection::JsonConnection;
use super::inventory_repository::InventoryRepository;
use crate::domain::models::sale_record::SaleRecord;
use crate::storage::traits::{InventoryStorage, SaleStorage};

/// JSON-file-backed sale repository.
///
/// Sales are append-only. Storing a sale also decrements the referenced
/// inventory item's quantity, which is why this repository holds an inventory
/// repository of its own.
#[derive(Clone)]
pub struct SaleRepository {
    connection: JsonConnection,
    inventory_repository: InventoryRepository,
}

impl SaleRepository {
    /// Create a new JSON sale repository.
    pub fn new(connection: JsonConnection) -> Self {
        let inventory_repository = InventoryRepository::new(connection.clone());
        Self {
            connection,
            inventory_repository,
        }
    }

    /// Read the full sales collection. A missing file reads as an empty
    /// collection.
    fn read_sales(&self) -> Result<Vec<SaleRecord>> {
        let file_path = self.connection.sales_file_path();
        if !file_path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&file_path)?;
        let sales: Vec<SaleRecord> = serde_json::from_str(&contents)?;
        Ok(sales)
    }

    /// Write the full sales collection, atomically via a temp file.
    fn write_sales(&self, sales: &[SaleRecord]) -> Result<()> {
        let file_path = self.connection.sales_file_path();
        let contents = serde_json::to_string_pretty(sales)?;

        let temp_path = file_path.with_extension("tmp");
        fs::write(&temp_path, contents)?;
        fs::rename(&temp_path, &file_path)?;

        debug!("Wrote {} sale records to {}", sales.len(), file_path.display());
        Ok(())
    }
}

impl SaleStorage for SaleRepository {
    fn store_sale(&self, sale: &SaleRecord) -> Result<()> {
        let mut sales = self.read_sales()?;
        sales.push(sale.clone());
        self.write_sales(&sales)?;

        self.inventory_repository
            .decrement_quantity(&sale.item_id, sale.quantity_sold)
    }

    fn get_sale(&self, sale_id: &str) -> Result<Option<SaleRecord>> {
        let sales = self.read_sales()?;
        Ok(sales.into_iter().find(|sale| sale.id == sale_id))
    }

    fn list_sales(&self) -> Result<Vec<SaleRecord>> {
        self.read_sales()
    }
}

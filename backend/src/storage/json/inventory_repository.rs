use anyhow::Result;
use log::{debug, warn};
use std::fs;

use super::connection::JsonConnection;
use crate::domain::models::inventory_item::InventoryItem;
use crate::storage::traits::InventoryStorage;

/// JSON-file-backed inventory repository.
///
/// The whole collection is read into memory on every call and rewritten
/// wholesale on every mutation; there is no incremental update path.
#[derive(Clone)]
pub struct InventoryRepository {
    connection: JsonConnection,
}

impl InventoryRepository {
    /// Create a new JSON inventory repository.
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }

    /// Read the full inventory collection. A missing file reads as an empty
    /// collection.
    fn read_items(&self) -> Result<Vec<InventoryItem>> {
        let file_path = self.connection.inventory_file_path();
        if !file_path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&file_path)?;
        let items: Vec<InventoryItem> = serde_json::from_str(&contents)?;
        Ok(items)
    }

    /// Write the full inventory collection, atomically via a temp file.
    fn write_items(&self, items: &[InventoryItem]) -> Result<()> {
        let file_path = self.connection.inventory_file_path();
        let contents = serde_json::to_string_pretty(items)?;

        let temp_path = file_path.with_extension("tmp");
        fs::write(&temp_path, contents)?;
        fs::rename(&temp_path, &file_path)?;

        debug!("Wrote {} inventory items to {}", items.len(), file_path.display());
        Ok(())
    }
}

impl InventoryStorage for InventoryRepository {
    fn store_item(&self, item: &InventoryItem) -> Result<()> {
        let mut items = self.read_items()?;
        items.push(item.clone());
        self.write_items(&items)
    }

    fn get_item(&self, item_id: &str) -> Result<Option<InventoryItem>> {
        let items = self.read_items()?;
        Ok(items.into_iter().find(|item| item.id == item_id))
    }

    fn list_items(&self) -> Result<Vec<InventoryItem>> {
        self.read_items()
    }

    fn update_item(&self, item: &InventoryItem) -> Result<()> {
        let mut items = self.read_items()?;
        match items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => *existing = item.clone(),
            None => {
                warn!("Update for unknown inventory item: {}", item.id);
                return Ok(());
            }
        }
        self.write_items(&items)
    }

    fn delete_item(&self, item_id: &str) -> Result<bool> {
        let items = self.read_items()?;
        let before = items.len();
        let remaining: Vec<InventoryItem> =
            items.into_iter().filter(|item| item.id != item_id).collect();

        if remaining.len() == before {
            return Ok(false);
        }

        self.write_items(&remaining)?;
        Ok(true)
    }

    fn decrement_quantity(&self, item_id: &str, by: i64) -> Result<()> {
        let mut items = self.read_items()?;
        match items.iter_mut().find(|item| item.id == item_id) {
            Some(item) => {
                item.quantity -= by;
                self.write_items(&items)
            }
            // The referenced item may have been deleted; the sale stands on
            // its own and inventory is left untouched.
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::json::test_utils::test_item;
    use tempfile::TempDir;

    fn setup() -> (InventoryRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();
        (InventoryRepository::new(connection), temp_dir)
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let (repo, _temp_dir) = setup();
        assert!(repo.list_items().unwrap().is_empty());
        assert!(repo.get_item("item::1").unwrap().is_none());
    }

    #[test]
    fn test_store_and_get_item() {
        let (repo, _temp_dir) = setup();
        let item = test_item("item::1", "Blue Pen", 1.0, 2.5, 100, "Stationery");

        repo.store_item(&item).unwrap();

        assert_eq!(repo.get_item("item::1").unwrap(), Some(item));
    }

    #[test]
    fn test_items_persist_across_connections() {
        let temp_dir = TempDir::new().unwrap();
        {
            let connection = JsonConnection::new(temp_dir.path()).unwrap();
            let repo = InventoryRepository::new(connection);
            repo.store_item(&test_item("item::1", "Notebook", 2.0, 5.0, 30, "Stationery"))
                .unwrap();
        }

        let connection = JsonConnection::new(temp_dir.path()).unwrap();
        let repo = InventoryRepository::new(connection);
        let items = repo.list_items().unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Notebook");
    }

    #[test]
    fn test_update_item_overwrites_fields() {
        let (repo, _temp_dir) = setup();
        let mut item = test_item("item::1", "Blue Pen", 1.0, 2.5, 100, "Stationery");
        repo.store_item(&item).unwrap();

        item.selling_price = 3.0;
        item.quantity = 80;
        repo.update_item(&item).unwrap();

        let stored = repo.get_item("item::1").unwrap().unwrap();
        assert_eq!(stored.selling_price, 3.0);
        assert_eq!(stored.quantity, 80);
    }

    #[test]
    fn test_delete_item() {
        let (repo, _temp_dir) = setup();
        repo.store_item(&test_item("item::1", "Blue Pen", 1.0, 2.5, 100, "Stationery"))
            .unwrap();

        assert!(repo.delete_item("item::1").unwrap());
        assert!(repo.list_items().unwrap().is_empty());

        assert!(!repo.delete_item("item::1").unwrap());
        assert!(!repo.delete_item("item::missing").unwrap());
    }

    #[test]
    fn test_decrement_quantity() {
        let (repo, _temp_dir) = setup();
        repo.store_item(&test_item("item::1", "Blue Pen", 1.0, 2.5, 100, "Stationery"))
            .unwrap();

        repo.decrement_quantity("item::1", 3).unwrap();

        assert_eq!(repo.get_item("item::1").unwrap().unwrap().quantity, 97);
    }

    #[test]
    fn test_decrement_quantity_missing_item_is_noop() {
        let (repo, _temp_dir) = setup();
        repo.store_item(&test_item("item::1", "Blue Pen", 1.0, 2.5, 100, "Stationery"))
            .unwrap();

        repo.decrement_quantity("item::gone", 3).unwrap();

        assert_eq!(repo.get_item("item::1").unwrap().unwrap().quantity, 100);
    }
}

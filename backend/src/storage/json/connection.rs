use anyhow::Result;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::storage::traits::Connection;

/// JsonConnection manages the data directory and the per-collection file
/// paths inside it.
#[derive(Clone)]
pub struct JsonConnection {
    base_directory: PathBuf,
}

impl JsonConnection {
    /// Create a new JSON connection with a base directory.
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Create a connection in the default data directory,
    /// `~/Documents/Sales Tracker`.
    pub fn new_default() -> Result<Self> {
        let home_dir = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| anyhow::anyhow!("Could not determine home directory"))?;

        let data_dir = PathBuf::from(home_dir).join("Documents").join("Sales Tracker");
        Self::new(data_dir)
    }

    /// Get the base directory path.
    pub fn base_directory(&self) -> PathBuf {
        self.base_directory.clone()
    }

    /// File holding the inventory collection.
    pub fn inventory_file_path(&self) -> PathBuf {
        self.base_directory.join("inventory.json")
    }

    /// File holding the sales collection.
    pub fn sales_file_path(&self) -> PathBuf {
        self.base_directory.join("sales.json")
    }

    /// File holding the user settings object.
    pub fn settings_file_path(&self) -> PathBuf {
        self.base_directory.join("settings.json")
    }
}

impl Connection for JsonConnection {
    type InventoryRepository = super::inventory_repository::InventoryRepository;
    type SaleRepository = super::sale_repository::SaleRepository;

    fn create_inventory_repository(&self) -> Self::InventoryRepository {
        super::inventory_repository::InventoryRepository::new(self.clone())
    }

    fn create_sale_repository(&self) -> Self::SaleRepository {
        super::sale_repository::SaleRepository::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("data").join("tracker");

        let connection = JsonConnection::new(&nested).unwrap();

        assert!(nested.exists());
        assert_eq!(connection.base_directory(), nested);
    }

    #[test]
    fn test_collection_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();

        assert_eq!(
            connection.inventory_file_path(),
            temp_dir.path().join("inventory.json")
        );
        assert_eq!(connection.sales_file_path(), temp_dir.path().join("sales.json"));
        assert_eq!(
            connection.settings_file_path(),
            temp_dir.path().join("settings.json")
        );
    }
}

//! # JSON Storage Module
//!
//! File-based storage for the sales tracker: each collection is one JSON
//! array under a stable file name in the data directory, mirroring the
//! key-value layout the tracker has always persisted.
//!
//! ## Layout
//!
//! ```text
//! data/
//! ├── inventory.json    ← inventory items (array)
//! ├── sales.json        ← sale records (array)
//! └── settings.json     ← user settings (object)
//! ```
//!
//! A collection file that does not exist yet reads as an empty collection.
//! Every mutation rewrites the whole file atomically (temp file + rename),
//! and every read takes a full snapshot, so a computation never observes a
//! partial write.

pub mod connection;
pub mod inventory_repository;
pub mod sale_repository;
pub mod settings_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::JsonConnection;
pub use inventory_repository::InventoryRepository;
pub use sale_repository::SaleRepository;
pub use settings_repository::{Settings, SettingsRepository, SettingsStorage};

//! # Storage Layer
//!
//! The record store behind the domain services: trait abstractions plus the
//! JSON-file implementation. Domain code depends only on the traits; tests
//! and the application shell choose the concrete connection.

pub mod json;
pub mod traits;

pub use json::{JsonConnection, Settings, SettingsRepository, SettingsStorage};
pub use traits::{Connection, InventoryStorage, SaleStorage};

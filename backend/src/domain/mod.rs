//! # Domain Layer
//!
//! Business logic of the sales tracker: inventory and sale recording on top
//! of the record store, the pure aggregation engine, report assembly, export
//! rendering, and the currency preference. Services are generic over the
//! storage [`Connection`](crate::storage::traits::Connection) so tests run
//! against isolated stores.

pub mod analytics_service;
pub mod commands;
pub mod currency_service;
pub mod export_service;
pub mod inventory_service;
pub mod models;
pub mod report_service;
pub mod sales_service;

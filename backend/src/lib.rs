//! # Sales Tracker Core
//!
//! The storage and domain layers of a single-user inventory/sales tracker:
//! a file-backed record store for inventory items and sale records, a set of
//! pure aggregation functions over those records (daily income, date-bucketed
//! series, product performance, category breakdowns, period growth), a report
//! assembler that packages a date window of that computation, and renderers
//! that serialize a report as delimited text, structured data, or a printable
//! document.
//!
//! The UI shell is a separate concern: it talks to this crate through the
//! typed requests and responses in the `shared` crate and is responsible for
//! parsing raw form input before anything reaches the domain layer.

pub mod domain;
pub mod storage;

//! Domain-level command and query types.
//!
//! These structs are consumed by the services in this crate. The UI shell is
//! responsible for parsing raw form input into these already-typed values;
//! dates arrive as `YYYY-MM-DD` calendar-day strings and are parsed once at
//! the service boundary.

pub mod inventory {
    use crate::domain::models::inventory_item::InventoryItem;

    /// Input for creating a new inventory item.
    #[derive(Debug, Clone)]
    pub struct CreateInventoryItemCommand {
        pub name: String,
        pub cost_price: f64,
        pub selling_price: f64,
        pub quantity: i64,
        pub category: String,
    }

    /// Input for updating an existing item. `None` fields are left unchanged;
    /// `id` and `created_at` are never overwritten.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateInventoryItemCommand {
        pub item_id: String,
        pub name: Option<String>,
        pub cost_price: Option<f64>,
        pub selling_price: Option<f64>,
        pub quantity: Option<i64>,
        pub category: Option<String>,
    }

    /// Input for fetching a single item.
    #[derive(Debug, Clone)]
    pub struct GetInventoryItemCommand {
        pub item_id: String,
    }

    /// Input for deleting an item.
    #[derive(Debug, Clone)]
    pub struct DeleteInventoryItemCommand {
        pub item_id: String,
    }

    /// Result of creating an item.
    #[derive(Debug, Clone)]
    pub struct CreateInventoryItemResult {
        pub item: InventoryItem,
    }

    /// Result of an update. `item` is `None` when the id did not resolve;
    /// a missing item is a sentinel, not an error.
    #[derive(Debug, Clone)]
    pub struct UpdateInventoryItemResult {
        pub item: Option<InventoryItem>,
    }

    /// Result of fetching a single item.
    #[derive(Debug, Clone)]
    pub struct GetInventoryItemResult {
        pub item: Option<InventoryItem>,
    }

    /// Result of a delete. `deleted` is false when the id was absent.
    #[derive(Debug, Clone)]
    pub struct DeleteInventoryItemResult {
        pub deleted: bool,
    }

    /// Result of listing the full inventory.
    #[derive(Debug, Clone)]
    pub struct ListInventoryResult {
        pub items: Vec<InventoryItem>,
    }
}

pub mod sales {
    use crate::domain::models::sale_record::SaleRecord;

    /// Input for recording a sale against an inventory item.
    ///
    /// The unit price is not part of the input: it is taken from the item's
    /// current selling price when the sale is recorded.
    #[derive(Debug, Clone)]
    pub struct RecordSaleCommand {
        pub item_id: String,
        pub quantity_sold: i64,
        /// Calendar day of the sale (`YYYY-MM-DD`).
        pub date: String,
    }

    /// Result of recording a sale.
    #[derive(Debug, Clone)]
    pub struct RecordSaleResult {
        pub sale: SaleRecord,
        pub success_message: String,
    }

    /// Result of listing all sales.
    #[derive(Debug, Clone)]
    pub struct ListSalesResult {
        pub sales: Vec<SaleRecord>,
    }
}

pub mod analytics {
    /// Query for the live dashboard overview.
    #[derive(Debug, Clone)]
    pub struct AnalyticsQuery {
        /// Length of the chart window in days (7, 30 or 90 in the UI).
        pub window_days: u32,
        /// Reference day for the window (`YYYY-MM-DD`); today when `None`.
        pub today: Option<String>,
    }
}

pub mod reports {
    /// Input for assembling a report over an inclusive date window.
    ///
    /// The window is assumed well-formed: the UI validates that
    /// `start_date <= end_date` before this command is built.
    #[derive(Debug, Clone)]
    pub struct GenerateReportCommand {
        pub business_name: String,
        pub start_date: String,
        pub end_date: String,
        /// Date stamped on the report (`YYYY-MM-DD`); today when `None`.
        pub report_date: Option<String>,
    }
}

pub mod services;

pub use services::{start_stock_clearing_task, CatalogService, ClearStockReport, PublisherService};

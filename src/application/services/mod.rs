//! Application services

mod catalog;
mod publisher;
mod stock_clearing;

pub use catalog::{CatalogService, ClearStockReport};
pub use publisher::PublisherService;
pub use stock_clearing::start_stock_clearing_task;

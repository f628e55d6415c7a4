//! # Game Catalog
//!
//! Catalog backend for video games and their publishers, with an
//! age-based stock clearing job that discounts or removes old games.
//!
//! ## Architecture
//!
//! - **domain**: entities, stock policy and repository traits
//! - **application**: catalog and publisher services, scheduled jobs
//! - **infrastructure**: SeaORM persistence and the in-memory store
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: runtime wiring and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use application::{CatalogService, ClearStockReport, PublisherService};
pub use domain::{DomainError, DomainResult, Game, Publisher, StockPolicy};
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};
pub use interfaces::create_api_router;

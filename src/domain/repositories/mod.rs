//! Repository access for the domain layer
//!
//! - `RepositoryProvider`: unified access to the per-aggregate repositories
//! - `DomainResult`: standard result type for domain operations

use std::sync::Arc;

use super::game::GameRepository;
use super::publisher::PublisherRepository;

pub use crate::shared::types::errors::DomainResult;

/// Provides access to all domain repositories.
///
/// ```ignore
/// let catalog = CatalogService::from_repos(&SeaOrmRepositoryProvider::new(db));
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn games(&self) -> Arc<dyn GameRepository>;
    fn publishers(&self) -> Arc<dyn PublisherRepository>;
}

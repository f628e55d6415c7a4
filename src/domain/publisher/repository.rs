//! Publisher repository interface

use async_trait::async_trait;

use super::model::{NewPublisher, Publisher};
use crate::domain::DomainResult;

/// Publisher store. `update` and `delete` complete the store contract; the
/// HTTP surface only creates and reads publishers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PublisherRepository: Send + Sync {
    /// Insert a new publisher; the store assigns the id
    async fn insert(&self, publisher: NewPublisher) -> DomainResult<Publisher>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Publisher>>;
    async fn find_all(&self) -> DomainResult<Vec<Publisher>>;
    async fn update(&self, publisher: Publisher) -> DomainResult<Publisher>;
    async fn delete(&self, id: &str) -> DomainResult<()>;
}

//! Publisher registration and lookup

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    DomainError, DomainResult, NewPublisher, Publisher, PublisherRepository, RepositoryProvider,
};

/// Service for publisher operations
pub struct PublisherService {
    publishers: Arc<dyn PublisherRepository>,
}

impl PublisherService {
    pub fn new(publishers: Arc<dyn PublisherRepository>) -> Self {
        Self { publishers }
    }

    pub fn from_repos(repos: &dyn RepositoryProvider) -> Self {
        Self::new(repos.publishers())
    }

    pub async fn create(&self, input: NewPublisher) -> DomainResult<Publisher> {
        input.validate()?;
        let publisher = self.publishers.insert(input).await?;
        info!(publisher_id = %publisher.id, name = %publisher.name, "Publisher created");
        Ok(publisher)
    }

    pub async fn find_all(&self) -> DomainResult<Vec<Publisher>> {
        self.publishers.find_all().await
    }

    pub async fn find_one(&self, id: &str) -> DomainResult<Publisher> {
        self.publishers
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Publisher", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::publisher::repository::MockPublisherRepository;

    #[tokio::test]
    async fn create_assigns_store_id() {
        let mut repo = MockPublisherRepository::new();
        repo.expect_insert()
            .times(1)
            .returning(|p| Ok(p.with_id("pub-1")));

        let created = PublisherService::new(Arc::new(repo))
            .create(NewPublisher::new("Ultra Gaming", 123, "1234"))
            .await
            .unwrap();

        assert_eq!(created.id, "pub-1");
        assert_eq!(created.name, "Ultra Gaming");
    }

    #[tokio::test]
    async fn create_rejects_blank_name() {
        let mut repo = MockPublisherRepository::new();
        repo.expect_insert().never();

        let err = PublisherService::new(Arc::new(repo))
            .create(NewPublisher::new("", 123, "1234"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn find_one_missing_is_not_found() {
        let mut repo = MockPublisherRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let err = PublisherService::new(Arc::new(repo))
            .find_one("ghost")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}

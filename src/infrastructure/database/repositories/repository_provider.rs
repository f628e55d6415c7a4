//! SeaORM implementation of RepositoryProvider

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::domain::game::GameRepository;
use crate::domain::publisher::PublisherRepository;
use crate::domain::repositories::RepositoryProvider;

use super::game_repository::SeaOrmGameRepository;
use super::publisher_repository::SeaOrmPublisherRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repositories.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let game = repos.games().find_by_id("abc").await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    games: Arc<SeaOrmGameRepository>,
    publishers: Arc<SeaOrmPublisherRepository>,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            games: Arc::new(SeaOrmGameRepository::new(db.clone())),
            publishers: Arc::new(SeaOrmPublisherRepository::new(db)),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn games(&self) -> Arc<dyn GameRepository> {
        self.games.clone()
    }

    fn publishers(&self) -> Arc<dyn PublisherRepository> {
        self.publishers.clone()
    }
}

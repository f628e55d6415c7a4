//! Game repository interface

use async_trait::async_trait;
use chrono::NaiveDate;

use super::model::{Game, GameRecord, NewGame};
use crate::domain::DomainResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GameRepository: Send + Sync {
    /// Insert a new game; the store assigns the id
    async fn insert(&self, game: NewGame) -> DomainResult<GameRecord>;

    /// Find a game with its publisher joined in
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Game>>;

    /// All games with their publishers, ordered by id
    async fn find_all(&self) -> DomainResult<Vec<Game>>;

    /// Games released on or before `date`
    async fn find_released_before(&self, date: NaiveDate) -> DomainResult<Vec<GameRecord>>;

    /// Overwrite an existing game
    async fn update(&self, game: GameRecord) -> DomainResult<GameRecord>;

    /// Overwrite several games in one transaction
    async fn update_many(&self, games: Vec<GameRecord>) -> DomainResult<()>;

    async fn delete(&self, id: &str) -> DomainResult<()>;

    /// Delete several games in one transaction
    async fn delete_many(&self, ids: Vec<String>) -> DomainResult<()>;
}

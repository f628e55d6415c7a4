//! In-memory storage implementation

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;

use crate::domain::game::{Game, GameRecord, GameRepository, NewGame};
use crate::domain::publisher::{NewPublisher, Publisher, PublisherRepository};
use crate::domain::repositories::RepositoryProvider;
use crate::domain::{DomainError, DomainResult};

/// In-memory catalog storage for development and testing.
///
/// Mirrors the relational schema's foreign key: a game can only be stored
/// against a known publisher, and a referenced publisher cannot be deleted.
pub struct InMemoryStorage {
    games: DashMap<String, GameRecord>,
    publishers: DashMap<String, Publisher>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            games: DashMap::new(),
            publishers: DashMap::new(),
        }
    }

    fn ensure_publisher(&self, publisher_id: &str) -> DomainResult<()> {
        if !self.publishers.contains_key(publisher_id) {
            return Err(DomainError::Storage(format!(
                "foreign key violation: unknown publisher {}",
                publisher_id
            )));
        }
        Ok(())
    }

    fn hydrate(&self, record: GameRecord) -> DomainResult<Game> {
        let publisher = self
            .publishers
            .get(&record.publisher_id)
            .map(|p| p.value().clone())
            .ok_or_else(|| {
                DomainError::Storage(format!(
                    "Game {} references missing publisher {}",
                    record.id, record.publisher_id
                ))
            })?;
        Ok(Game::from_record(record, publisher))
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GameRepository for InMemoryStorage {
    async fn insert(&self, game: NewGame) -> DomainResult<GameRecord> {
        self.ensure_publisher(&game.publisher_id)?;
        let record = game.into_record(uuid::Uuid::new_v4().to_string());
        self.games.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Game>> {
        let record = self.games.get(id).map(|g| g.value().clone());
        record.map(|r| self.hydrate(r)).transpose()
    }

    async fn find_all(&self) -> DomainResult<Vec<Game>> {
        let mut records: Vec<GameRecord> = self.games.iter().map(|e| e.value().clone()).collect();
        records.sort_by(|a, b| a.id.cmp(&b.id));
        records.into_iter().map(|r| self.hydrate(r)).collect()
    }

    async fn find_released_before(&self, date: NaiveDate) -> DomainResult<Vec<GameRecord>> {
        let mut records: Vec<GameRecord> = self
            .games
            .iter()
            .filter(|e| e.value().release_date <= date)
            .map(|e| e.value().clone())
            .collect();
        records.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(records)
    }

    async fn update(&self, game: GameRecord) -> DomainResult<GameRecord> {
        self.ensure_publisher(&game.publisher_id)?;
        match self.games.get_mut(&game.id) {
            Some(mut entry) => {
                *entry = game.clone();
                Ok(game)
            }
            None => Err(DomainError::not_found("Game", game.id)),
        }
    }

    async fn update_many(&self, games: Vec<GameRecord>) -> DomainResult<()> {
        // validate everything first so a failure leaves the map untouched
        for game in &games {
            self.ensure_publisher(&game.publisher_id)?;
            if !self.games.contains_key(&game.id) {
                return Err(DomainError::not_found("Game", game.id.clone()));
            }
        }
        for game in games {
            self.games.insert(game.id.clone(), game);
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        self.games.remove(id);
        Ok(())
    }

    async fn delete_many(&self, ids: Vec<String>) -> DomainResult<()> {
        for id in ids {
            self.games.remove(&id);
        }
        Ok(())
    }
}

#[async_trait]
impl PublisherRepository for InMemoryStorage {
    async fn insert(&self, publisher: NewPublisher) -> DomainResult<Publisher> {
        let publisher = publisher.with_id(uuid::Uuid::new_v4().to_string());
        self.publishers
            .insert(publisher.id.clone(), publisher.clone());
        Ok(publisher)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Publisher>> {
        Ok(self.publishers.get(id).map(|p| p.value().clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Publisher>> {
        let mut all: Vec<Publisher> = self.publishers.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(all)
    }

    async fn update(&self, publisher: Publisher) -> DomainResult<Publisher> {
        match self.publishers.get_mut(&publisher.id) {
            Some(mut entry) => {
                *entry = publisher.clone();
                Ok(publisher)
            }
            None => Err(DomainError::not_found("Publisher", publisher.id)),
        }
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        if self.games.iter().any(|g| g.value().publisher_id == id) {
            return Err(DomainError::Storage(format!(
                "foreign key violation: publisher {} is referenced by games",
                id
            )));
        }
        self.publishers.remove(id);
        Ok(())
    }
}

/// RepositoryProvider over a shared [`InMemoryStorage`]
#[derive(Clone, Default)]
pub struct InMemoryRepositoryProvider {
    storage: Arc<InMemoryStorage>,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn games(&self) -> Arc<dyn GameRepository> {
        self.storage.clone()
    }

    fn publishers(&self) -> Arc<dyn PublisherRepository> {
        self.storage.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn new_game(publisher_id: &str) -> NewGame {
        NewGame {
            title: "God of wars 17".into(),
            price: Decimal::new(78, 0),
            publisher_id: publisher_id.into(),
            tags: vec!["god".into(), "of".into(), "wars".into()],
            release_date: NaiveDate::from_ymd_opt(2022, 1, 25).unwrap(),
        }
    }

    #[tokio::test]
    async fn games_are_returned_with_publisher() {
        let storage = InMemoryStorage::new();
        let publisher = PublisherRepository::insert(
            &storage,
            NewPublisher::new("Ultra Gaming", 123, "1234"),
        )
        .await
        .unwrap();
        let created = GameRepository::insert(&storage, new_game(&publisher.id))
            .await
            .unwrap();

        let found = GameRepository::find_by_id(&storage, &created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.publisher, publisher);
    }

    #[tokio::test]
    async fn unknown_publisher_is_rejected_like_a_foreign_key() {
        let storage = InMemoryStorage::new();
        let err = GameRepository::insert(&storage, new_game("ghost"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Storage(_)));
    }

    #[tokio::test]
    async fn referenced_publisher_cannot_be_deleted() {
        let storage = InMemoryStorage::new();
        let publisher = PublisherRepository::insert(
            &storage,
            NewPublisher::new("Ultra Gaming", 123, "1234"),
        )
        .await
        .unwrap();
        GameRepository::insert(&storage, new_game(&publisher.id))
            .await
            .unwrap();

        assert!(PublisherRepository::delete(&storage, &publisher.id)
            .await
            .is_err());
    }
}

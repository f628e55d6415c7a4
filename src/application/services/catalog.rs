//! Catalog business logic: game CRUD, publisher resolution and stock clearing

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{debug, info};

use crate::domain::game::StockAction;
use crate::domain::{
    DomainError, DomainResult, Game, GameChanges, GameRecord, GameRepository, NewGame, Publisher,
    PublisherRepository, RepositoryProvider, StockPolicy,
};

/// Outcome of one stock clearing run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClearStockReport {
    pub deleted: usize,
    pub discounted: usize,
}

/// Service for catalog operations
pub struct CatalogService {
    games: Arc<dyn GameRepository>,
    publishers: Arc<dyn PublisherRepository>,
    policy: StockPolicy,
}

impl CatalogService {
    pub fn new(games: Arc<dyn GameRepository>, publishers: Arc<dyn PublisherRepository>) -> Self {
        Self {
            games,
            publishers,
            policy: StockPolicy::default(),
        }
    }

    pub fn from_repos(repos: &dyn RepositoryProvider) -> Self {
        Self::new(repos.games(), repos.publishers())
    }

    pub fn with_policy(mut self, policy: StockPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub async fn create(&self, input: NewGame) -> DomainResult<Game> {
        input.validate()?;
        let publisher = self.publisher_or_fail(&input.publisher_id).await?;

        let record = self.games.insert(input).await?;
        info!(game_id = %record.id, publisher_id = %publisher.id, "Game created");

        Ok(Game::from_record(record, publisher))
    }

    pub async fn find_all(&self) -> DomainResult<Vec<Game>> {
        self.games.find_all().await
    }

    pub async fn find_one(&self, id: &str) -> DomainResult<Game> {
        self.game_or_fail(id).await
    }

    /// Partial update. The publisher is only looked up when the request
    /// names a different one than the game currently has.
    pub async fn update(&self, id: &str, changes: GameChanges) -> DomainResult<Game> {
        let (current, publisher) = self.game_or_fail(id).await?.into_parts();

        let publisher = match changes.publisher_change(&current.publisher_id) {
            Some(requested) => self.publisher_or_fail(requested).await?,
            None => publisher,
        };

        let merged = current.merged(changes);
        merged.validate()?;

        let saved = self.games.update(merged).await?;
        info!(game_id = %saved.id, "Game updated");

        Ok(Game::from_record(saved, publisher))
    }

    pub async fn remove(&self, id: &str) -> DomainResult<()> {
        let game = self.game_or_fail(id).await?;
        self.games.delete(&game.id).await?;
        info!(game_id = %game.id, "Game removed");
        Ok(())
    }

    pub async fn find_publisher(&self, id: &str) -> DomainResult<Publisher> {
        Ok(self.game_or_fail(id).await?.publisher)
    }

    /// Run the stock clearing job relative to today's date (UTC).
    pub async fn clear_stock(&self) -> DomainResult<ClearStockReport> {
        self.clear_stock_as_of(Utc::now().date_naive()).await
    }

    /// Delete games older than the delete threshold and discount the ones
    /// between the delete and discount thresholds, as seen from `today`.
    pub async fn clear_stock_as_of(&self, today: NaiveDate) -> DomainResult<ClearStockReport> {
        let thresholds = self.policy.thresholds(today)?;
        let candidates = self.games.find_released_before(thresholds.update).await?;

        let mut to_delete: Vec<String> = Vec::new();
        let mut to_discount: Vec<GameRecord> = Vec::new();

        for game in candidates {
            match thresholds.classify(game.release_date) {
                StockAction::Delete => to_delete.push(game.id),
                StockAction::Discount => {
                    let discounted = self.policy.discounted_price(game.price)?;
                    to_discount.push(game.with_price_discount(discounted));
                }
                StockAction::Keep => {
                    debug!(game_id = %game.id, release_date = %game.release_date, "Skipping game newer than discount threshold");
                }
            }
        }

        let report = ClearStockReport {
            deleted: to_delete.len(),
            discounted: to_discount.len(),
        };

        // Disjoint record sets: run both, then surface the first failure.
        let (deleted, discounted) = tokio::join!(
            self.games.delete_many(to_delete),
            self.games.update_many(to_discount),
        );
        deleted?;
        discounted?;

        info!(
            today = %today,
            delete_threshold = %thresholds.delete,
            discount_threshold = %thresholds.update,
            deleted = report.deleted,
            discounted = report.discounted,
            "Stock cleared"
        );

        Ok(report)
    }

    async fn game_or_fail(&self, id: &str) -> DomainResult<Game> {
        self.games
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Game", id))
    }

    async fn publisher_or_fail(&self, id: &str) -> DomainResult<Publisher> {
        self.publishers
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Publisher", id))
    }
}

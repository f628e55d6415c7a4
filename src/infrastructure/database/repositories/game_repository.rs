//! SeaORM implementation of GameRepository

use std::str::FromStr;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use super::publisher_repository::model_to_domain as publisher_to_domain;
use crate::domain::game::{Game, GameRecord, GameRepository, NewGame};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{game, publisher};

pub struct SeaOrmGameRepository {
    db: DatabaseConnection,
}

impl SeaOrmGameRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn parse_decimal(field: &str, raw: &str) -> DomainResult<Decimal> {
    Decimal::from_str(raw)
        .map_err(|e| DomainError::Storage(format!("Invalid {} '{}': {}", field, raw, e)))
}

fn encode_tags(tags: &[String]) -> DomainResult<String> {
    serde_json::to_string(tags).map_err(|e| DomainError::Storage(format!("Invalid tags: {}", e)))
}

fn decode_tags(raw: &str) -> DomainResult<Vec<String>> {
    serde_json::from_str(raw)
        .map_err(|e| DomainError::Storage(format!("Invalid tags '{}': {}", raw, e)))
}

fn model_to_record(m: game::Model) -> DomainResult<GameRecord> {
    Ok(GameRecord {
        price: parse_decimal("price", &m.price)?,
        price_discount: parse_decimal("price_discount", &m.price_discount)?,
        tags: decode_tags(&m.tags)?,
        id: m.id,
        title: m.title,
        publisher_id: m.publisher_id,
        release_date: m.release_date,
    })
}

fn joined_to_game(m: game::Model, p: Option<publisher::Model>) -> DomainResult<Game> {
    let Some(p) = p else {
        return Err(DomainError::Storage(format!(
            "Game {} references missing publisher {}",
            m.id, m.publisher_id
        )));
    };
    Ok(Game::from_record(model_to_record(m)?, publisher_to_domain(p)))
}

fn record_to_active(r: GameRecord) -> DomainResult<game::ActiveModel> {
    Ok(game::ActiveModel {
        tags: Set(encode_tags(&r.tags)?),
        id: Set(r.id),
        title: Set(r.title),
        price: Set(r.price.normalize().to_string()),
        price_discount: Set(r.price_discount.normalize().to_string()),
        publisher_id: Set(r.publisher_id),
        release_date: Set(r.release_date),
    })
}

// ── GameRepository impl ─────────────────────────────────────────

#[async_trait]
impl GameRepository for SeaOrmGameRepository {
    async fn insert(&self, new_game: NewGame) -> DomainResult<GameRecord> {
        let record = new_game.into_record(uuid::Uuid::new_v4().to_string());
        debug!("Inserting game: {} ({})", record.id, record.title);

        record_to_active(record.clone())?.insert(&self.db).await?;
        Ok(record)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Game>> {
        let found = game::Entity::find_by_id(id)
            .find_also_related(publisher::Entity)
            .one(&self.db)
            .await?;

        found.map(|(g, p)| joined_to_game(g, p)).transpose()
    }

    async fn find_all(&self) -> DomainResult<Vec<Game>> {
        let rows = game::Entity::find()
            .find_also_related(publisher::Entity)
            .order_by_asc(game::Column::Id)
            .all(&self.db)
            .await?;

        rows.into_iter()
            .map(|(g, p)| joined_to_game(g, p))
            .collect()
    }

    async fn find_released_before(&self, date: NaiveDate) -> DomainResult<Vec<GameRecord>> {
        let models = game::Entity::find()
            .filter(game::Column::ReleaseDate.lte(date))
            .order_by_asc(game::Column::Id)
            .all(&self.db)
            .await?;

        models.into_iter().map(model_to_record).collect()
    }

    async fn update(&self, record: GameRecord) -> DomainResult<GameRecord> {
        debug!("Updating game: {}", record.id);

        match record_to_active(record.clone())?.update(&self.db).await {
            Ok(_) => Ok(record),
            Err(DbErr::RecordNotUpdated) => Err(DomainError::not_found("Game", record.id)),
            Err(e) => Err(e.into()),
        }
    }

    async fn update_many(&self, records: Vec<GameRecord>) -> DomainResult<()> {
        if records.is_empty() {
            return Ok(());
        }
        debug!("Updating {} games", records.len());

        let txn = self.db.begin().await?;
        for record in records {
            record_to_active(record)?.update(&txn).await?;
        }
        txn.commit().await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        debug!("Deleting game: {}", id);
        game::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }

    async fn delete_many(&self, ids: Vec<String>) -> DomainResult<()> {
        if ids.is_empty() {
            return Ok(());
        }
        debug!("Deleting {} games", ids.len());

        game::Entity::delete_many()
            .filter(game::Column::Id.is_in(ids))
            .exec(&self.db)
            .await?;
        Ok(())
    }
}

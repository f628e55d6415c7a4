//! Game domain entity

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::publisher::Publisher;
use crate::shared::{ensure_non_negative, ensure_not_blank, DomainResult};

/// Game as stored: the publisher is referenced by id only.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub id: String,
    pub title: String,
    /// Base price
    pub price: Decimal,
    /// Price after the stock clearing discount, 0 until one is applied
    pub price_discount: Decimal,
    pub publisher_id: String,
    pub tags: Vec<String>,
    pub release_date: NaiveDate,
}

impl GameRecord {
    pub fn validate(&self) -> DomainResult<()> {
        ensure_not_blank("title", &self.title)?;
        ensure_non_negative("price", self.price)?;
        ensure_non_negative("price_discount", self.price_discount)
    }

    /// Build a new record from `self` with the provided changes applied.
    /// Fields absent from `changes` keep their current values.
    pub fn merged(&self, changes: GameChanges) -> GameRecord {
        GameRecord {
            id: self.id.clone(),
            title: changes.title.unwrap_or_else(|| self.title.clone()),
            price: changes.price.unwrap_or(self.price),
            price_discount: self.price_discount,
            publisher_id: changes
                .publisher_id
                .unwrap_or_else(|| self.publisher_id.clone()),
            tags: changes.tags.unwrap_or_else(|| self.tags.clone()),
            release_date: changes.release_date.unwrap_or(self.release_date),
        }
    }

    pub fn with_price_discount(mut self, price_discount: Decimal) -> GameRecord {
        self.price_discount = price_discount;
        self
    }
}

/// Game with its publisher resolved
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub id: String,
    pub title: String,
    pub price: Decimal,
    pub price_discount: Decimal,
    pub publisher: Publisher,
    pub tags: Vec<String>,
    pub release_date: NaiveDate,
}

impl Game {
    pub fn from_record(record: GameRecord, publisher: Publisher) -> Self {
        debug_assert_eq!(record.publisher_id, publisher.id);
        Self {
            id: record.id,
            title: record.title,
            price: record.price,
            price_discount: record.price_discount,
            publisher,
            tags: record.tags,
            release_date: record.release_date,
        }
    }

    /// Split into the stored record and the resolved publisher.
    pub fn into_parts(self) -> (GameRecord, Publisher) {
        let record = GameRecord {
            id: self.id,
            title: self.title,
            price: self.price,
            price_discount: self.price_discount,
            publisher_id: self.publisher.id.clone(),
            tags: self.tags,
            release_date: self.release_date,
        };
        (record, self.publisher)
    }
}

/// Input for creating a game
#[derive(Debug, Clone, PartialEq)]
pub struct NewGame {
    pub title: String,
    pub price: Decimal,
    pub publisher_id: String,
    pub tags: Vec<String>,
    pub release_date: NaiveDate,
}

impl NewGame {
    pub fn validate(&self) -> DomainResult<()> {
        ensure_not_blank("title", &self.title)?;
        ensure_non_negative("price", self.price)
    }

    /// Turn the input into a stored record. No discount applies yet.
    pub fn into_record(self, id: impl Into<String>) -> GameRecord {
        GameRecord {
            id: id.into(),
            title: self.title,
            price: self.price,
            price_discount: Decimal::ZERO,
            publisher_id: self.publisher_id,
            tags: self.tags,
            release_date: self.release_date,
        }
    }
}

/// Partial update of a game
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameChanges {
    pub title: Option<String>,
    pub price: Option<Decimal>,
    pub publisher_id: Option<String>,
    pub tags: Option<Vec<String>>,
    pub release_date: Option<NaiveDate>,
}

impl GameChanges {
    /// The requested publisher id, if it differs from `current`.
    pub fn publisher_change(&self, current: &str) -> Option<&str> {
        self.publisher_id
            .as_deref()
            .filter(|requested| *requested != current)
    }
}

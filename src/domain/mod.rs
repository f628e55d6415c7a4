//! Domain layer: entities, the stock clearing policy, and repository ports.

pub mod game;
pub mod publisher;
pub mod repositories;

pub use game::{Game, GameChanges, GameRecord, GameRepository, NewGame, StockPolicy};
pub use publisher::{NewPublisher, Publisher, PublisherRepository};
pub use repositories::{DomainResult, RepositoryProvider};

pub use crate::shared::DomainError;

//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod game_repository;
pub mod publisher_repository;
pub mod repository_provider;

pub use game_repository::SeaOrmGameRepository;
pub use publisher_repository::SeaOrmPublisherRepository;
pub use repository_provider::SeaOrmRepositoryProvider;

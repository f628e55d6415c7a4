//! Database entities module

pub mod game;
pub mod publisher;

pub use game::Entity as Game;
pub use publisher::Entity as Publisher;

//! Publisher aggregate
//!
//! Publishers are created independently and referenced by games.

pub mod model;
pub mod repository;

pub use model::{NewPublisher, Publisher};
pub use repository::PublisherRepository;

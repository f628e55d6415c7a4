//! In-memory storage module

pub mod memory;

pub use memory::{InMemoryRepositoryProvider, InMemoryStorage};

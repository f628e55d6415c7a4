//! Game aggregate
//!
//! Contains the Game entity, the stock clearing policy, and the
//! repository interface.

pub mod model;
pub mod repository;
pub mod stock_policy;

pub use model::{Game, GameChanges, GameRecord, NewGame};
pub use repository::GameRepository;
pub use stock_policy::{StockAction, StockPolicy, StockThresholds};

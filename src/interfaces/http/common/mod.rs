//! Shared HTTP building blocks

pub mod error;
pub mod validated_json;

pub use error::{ApiError, ErrorBody};
pub use validated_json::ValidatedJson;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Empty response for operations without return data
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmptyData {}

//! Publisher DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{NewPublisher, Publisher};
use crate::shared::validations::validate_not_blank;

/// Request to register a publisher
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePublisherRequest {
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
    /// Company registration number
    #[validate(range(min = 0, message = "siret must be non-negative"))]
    pub siret: i64,
    pub phone: String,
}

impl From<CreatePublisherRequest> for NewPublisher {
    fn from(req: CreatePublisherRequest) -> Self {
        NewPublisher::new(req.name, req.siret, req.phone)
    }
}

/// Publisher in API responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PublisherDto {
    pub id: String,
    pub name: String,
    pub siret: i64,
    pub phone: String,
}

impl From<Publisher> for PublisherDto {
    fn from(p: Publisher) -> Self {
        Self {
            id: p.id,
            name: p.name,
            siret: p.siret,
            phone: p.phone,
        }
    }
}

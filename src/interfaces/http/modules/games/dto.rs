//! Game DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{Game, GameChanges, NewGame};
use crate::interfaces::http::modules::publishers::PublisherDto;
use crate::shared::validations::{validate_non_negative, validate_not_blank};

/// Request to add a game to the catalog
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameRequest {
    #[validate(custom(function = "validate_not_blank"))]
    pub title: String,
    #[validate(custom(function = "validate_non_negative"))]
    pub price: Decimal,
    #[validate(length(min = 1, message = "publisherId is required"))]
    pub publisher_id: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Release date (YYYY-MM-DD)
    pub release_date: NaiveDate,
}

impl From<CreateGameRequest> for NewGame {
    fn from(req: CreateGameRequest) -> Self {
        NewGame {
            title: req.title,
            price: req.price,
            publisher_id: req.publisher_id,
            tags: req.tags,
            release_date: req.release_date,
        }
    }
}

/// Partial update; omitted fields keep their current value
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGameRequest {
    #[validate(custom(function = "validate_not_blank"))]
    pub title: Option<String>,
    #[validate(custom(function = "validate_non_negative"))]
    pub price: Option<Decimal>,
    pub publisher_id: Option<String>,
    pub tags: Option<Vec<String>>,
    pub release_date: Option<NaiveDate>,
}

impl From<UpdateGameRequest> for GameChanges {
    fn from(req: UpdateGameRequest) -> Self {
        GameChanges {
            title: req.title,
            price: req.price,
            publisher_id: req.publisher_id,
            tags: req.tags,
            release_date: req.release_date,
        }
    }
}

/// Game in API responses, publisher embedded
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GameDto {
    pub id: String,
    pub title: String,
    pub price: Decimal,
    pub price_discount: Decimal,
    pub publisher: PublisherDto,
    pub tags: Vec<String>,
    pub release_date: NaiveDate,
}

impl From<Game> for GameDto {
    fn from(game: Game) -> Self {
        Self {
            id: game.id,
            title: game.title,
            price: game.price,
            price_discount: game.price_discount,
            publisher: game.publisher.into(),
            tags: game.tags,
            release_date: game.release_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_uses_camel_case() {
        let req: CreateGameRequest = serde_json::from_value(serde_json::json!({
            "title": "God of wars 17",
            "price": 78,
            "publisherId": "pub-1",
            "tags": ["god", "of", "wars"],
            "releaseDate": "2022-01-25"
        }))
        .unwrap();

        assert_eq!(req.price, Decimal::new(78, 0));
        assert_eq!(req.publisher_id, "pub-1");
        assert_eq!(req.release_date, NaiveDate::from_ymd_opt(2022, 1, 25).unwrap());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn negative_price_fails_validation() {
        let req = UpdateGameRequest {
            price: Some(Decimal::new(-1, 0)),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn blank_title_fails_validation_on_create_and_update() {
        let create: CreateGameRequest = serde_json::from_value(serde_json::json!({
            "title": "   ",
            "price": 78,
            "publisherId": "pub-1",
            "releaseDate": "2022-01-25"
        }))
        .unwrap();
        let errors = create.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));

        for title in ["", " \t "] {
            let update = UpdateGameRequest {
                title: Some(title.into()),
                ..Default::default()
            };
            assert!(update.validate().is_err(), "{:?} should be rejected", title);
        }
    }

    #[test]
    fn empty_update_is_valid() {
        let req: UpdateGameRequest = serde_json::from_str("{}").unwrap();
        assert!(req.validate().is_ok());
        let changes: GameChanges = req.into();
        assert!(changes.publisher_id.is_none());
    }
}

//! Game HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::application::CatalogService;
use crate::interfaces::http::common::{ApiError, EmptyData, ErrorBody, ValidatedJson};
use crate::interfaces::http::modules::publishers::PublisherDto;

use super::dto::*;

/// Application state for game handlers.
#[derive(Clone)]
pub struct GameAppState {
    pub catalog: Arc<CatalogService>,
}

#[utoipa::path(
    post,
    path = "/games",
    tag = "Games",
    request_body = CreateGameRequest,
    responses(
        (status = 201, description = "Game created", body = GameDto),
        (status = 404, description = "Publisher not found", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ErrorBody)
    )
)]
pub async fn create_game(
    State(state): State<GameAppState>,
    ValidatedJson(request): ValidatedJson<CreateGameRequest>,
) -> Result<(StatusCode, Json<GameDto>), ApiError> {
    let game = state.catalog.create(request.into()).await?;
    Ok((StatusCode::CREATED, Json(game.into())))
}

#[utoipa::path(
    get,
    path = "/games",
    tag = "Games",
    responses(
        (status = 200, description = "All games with their publisher", body = Vec<GameDto>)
    )
)]
pub async fn list_games(
    State(state): State<GameAppState>,
) -> Result<Json<Vec<GameDto>>, ApiError> {
    let games = state.catalog.find_all().await?;
    Ok(Json(games.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/games/{id}",
    tag = "Games",
    params(("id" = String, Path, description = "Game ID")),
    responses(
        (status = 200, description = "Game details", body = GameDto),
        (status = 404, description = "Game not found", body = ErrorBody)
    )
)]
pub async fn get_game(
    State(state): State<GameAppState>,
    Path(id): Path<String>,
) -> Result<Json<GameDto>, ApiError> {
    let game = state.catalog.find_one(&id).await?;
    Ok(Json(game.into()))
}

#[utoipa::path(
    patch,
    path = "/games/{id}",
    tag = "Games",
    params(("id" = String, Path, description = "Game ID")),
    request_body = UpdateGameRequest,
    responses(
        (status = 200, description = "Game updated", body = GameDto),
        (status = 404, description = "Game or publisher not found", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ErrorBody)
    )
)]
pub async fn update_game(
    State(state): State<GameAppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateGameRequest>,
) -> Result<Json<GameDto>, ApiError> {
    let game = state.catalog.update(&id, request.into()).await?;
    Ok(Json(game.into()))
}

#[utoipa::path(
    delete,
    path = "/games/{id}",
    tag = "Games",
    params(("id" = String, Path, description = "Game ID")),
    responses(
        (status = 200, description = "Game deleted", body = EmptyData),
        (status = 404, description = "Game not found", body = ErrorBody)
    )
)]
pub async fn delete_game(
    State(state): State<GameAppState>,
    Path(id): Path<String>,
) -> Result<Json<EmptyData>, ApiError> {
    state.catalog.remove(&id).await?;
    Ok(Json(EmptyData {}))
}

#[utoipa::path(
    get,
    path = "/games/{id}/publisher",
    tag = "Games",
    params(("id" = String, Path, description = "Game ID")),
    responses(
        (status = 200, description = "Publisher of the game", body = PublisherDto),
        (status = 404, description = "Game not found", body = ErrorBody)
    )
)]
pub async fn get_game_publisher(
    State(state): State<GameAppState>,
    Path(id): Path<String>,
) -> Result<Json<PublisherDto>, ApiError> {
    let publisher = state.catalog.find_publisher(&id).await?;
    Ok(Json(publisher.into()))
}

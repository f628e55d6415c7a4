//! Publisher HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::application::PublisherService;
use crate::interfaces::http::common::{ApiError, ErrorBody, ValidatedJson};

use super::dto::*;

/// Application state for publisher handlers.
#[derive(Clone)]
pub struct PublisherAppState {
    pub publishers: Arc<PublisherService>,
}

#[utoipa::path(
    post,
    path = "/publishers",
    tag = "Publishers",
    request_body = CreatePublisherRequest,
    responses(
        (status = 201, description = "Publisher created", body = PublisherDto),
        (status = 400, description = "Invalid publisher", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ErrorBody)
    )
)]
pub async fn create_publisher(
    State(state): State<PublisherAppState>,
    ValidatedJson(request): ValidatedJson<CreatePublisherRequest>,
) -> Result<(StatusCode, Json<PublisherDto>), ApiError> {
    let publisher = state.publishers.create(request.into()).await?;
    Ok((StatusCode::CREATED, Json(publisher.into())))
}

#[utoipa::path(
    get,
    path = "/publishers",
    tag = "Publishers",
    responses(
        (status = 200, description = "All publishers", body = Vec<PublisherDto>)
    )
)]
pub async fn list_publishers(
    State(state): State<PublisherAppState>,
) -> Result<Json<Vec<PublisherDto>>, ApiError> {
    let publishers = state.publishers.find_all().await?;
    Ok(Json(publishers.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/publishers/{id}",
    tag = "Publishers",
    params(("id" = String, Path, description = "Publisher ID")),
    responses(
        (status = 200, description = "Publisher details", body = PublisherDto),
        (status = 404, description = "Publisher not found", body = ErrorBody)
    )
)]
pub async fn get_publisher(
    State(state): State<PublisherAppState>,
    Path(id): Path<String>,
) -> Result<Json<PublisherDto>, ApiError> {
    let publisher = state.publishers.find_one(&id).await?;
    Ok(Json(publisher.into()))
}

//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    extract::FromRef,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{CatalogService, PublisherService};

use super::common::{EmptyData, ErrorBody};
use super::modules::{games, health, publishers};

/// Unified state for all routes.
/// Axum extracts the specific handler state via `FromRef`.
#[derive(Clone)]
pub struct ApiState {
    pub catalog: Arc<CatalogService>,
    pub publishers: Arc<PublisherService>,
}

impl FromRef<ApiState> for games::GameAppState {
    fn from_ref(s: &ApiState) -> Self {
        games::GameAppState {
            catalog: Arc::clone(&s.catalog),
        }
    }
}

impl FromRef<ApiState> for publishers::PublisherAppState {
    fn from_ref(s: &ApiState) -> Self {
        publishers::PublisherAppState {
            publishers: Arc::clone(&s.publishers),
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        games::create_game,
        games::list_games,
        games::get_game,
        games::update_game,
        games::delete_game,
        games::get_game_publisher,
        publishers::create_publisher,
        publishers::list_publishers,
        publishers::get_publisher,
    ),
    components(
        schemas(
            ErrorBody,
            EmptyData,
            health::HealthResponse,
            games::CreateGameRequest,
            games::UpdateGameRequest,
            games::GameDto,
            publishers::CreatePublisherRequest,
            publishers::PublisherDto,
        )
    ),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Games", description = "Game catalog management"),
        (name = "Publishers", description = "Game publishers"),
    ),
    info(
        title = "Game Catalog API",
        version = "1.0.0",
        description = "REST API for managing video games and their publishers"
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    catalog: Arc<CatalogService>,
    publisher_service: Arc<PublisherService>,
) -> Router {
    let state = ApiState {
        catalog,
        publishers: publisher_service,
    };

    let game_routes = Router::new()
        .route("/", post(games::create_game).get(games::list_games))
        .route(
            "/{id}",
            get(games::get_game)
                .patch(games::update_game)
                .delete(games::delete_game),
        )
        .route("/{id}/publisher", get(games::get_game_publisher))
        .with_state(state.clone());

    let publisher_routes = Router::new()
        .route(
            "/",
            post(publishers::create_publisher).get(publishers::list_publishers),
        )
        .route("/{id}", get(publishers::get_publisher))
        .with_state(state);

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(health::health_check))
        .nest("/games", game_routes)
        .nest("/publishers", publisher_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::infrastructure::InMemoryRepositoryProvider;

    fn app() -> Router {
        let repos = InMemoryRepositoryProvider::new();
        create_api_router(
            Arc::new(CatalogService::from_repos(&repos)),
            Arc::new(PublisherService::from_repos(&repos)),
        )
    }

    async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn create_publisher(app: &Router) -> Value {
        let (status, body) = call(
            app,
            "POST",
            "/publishers",
            Some(json!({"name": "Ultra Gaming", "siret": 1234567, "phone": "0123456789"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body
    }

    async fn create_game(app: &Router, publisher_id: &str) -> Value {
        let (status, body) = call(
            app,
            "POST",
            "/games",
            Some(json!({
                "title": "God of wars 17",
                "price": 78,
                "publisherId": publisher_id,
                "tags": ["god", "of", "wars"],
                "releaseDate": "2022-01-25"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (status, body) = call(&app(), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn create_game_embeds_publisher() {
        let app = app();
        let publisher = create_publisher(&app).await;
        let game = create_game(&app, publisher["id"].as_str().unwrap()).await;

        assert!(!game["id"].as_str().unwrap().is_empty());
        assert_eq!(game["priceDiscount"].as_f64(), Some(0.0));
        assert_eq!(game["price"].as_f64(), Some(78.0));
        assert_eq!(game["releaseDate"], "2022-01-25");
        assert_eq!(game["tags"], json!(["god", "of", "wars"]));
        assert_eq!(game["publisher"], publisher);
    }

    #[tokio::test]
    async fn create_game_with_unknown_publisher_is_404() {
        let app = app();
        let (status, body) = call(
            &app,
            "POST",
            "/games",
            Some(json!({
                "title": "Orphan",
                "price": 10,
                "publisherId": "missing",
                "tags": [],
                "releaseDate": "2022-01-25"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"statusCode": 404, "message": "Not found"}));

        let (_, games) = call(&app, "GET", "/games", None).await;
        assert_eq!(games, json!([]));
    }

    #[tokio::test]
    async fn negative_price_is_rejected() {
        let app = app();
        let publisher = create_publisher(&app).await;
        let (status, body) = call(
            &app,
            "POST",
            "/games",
            Some(json!({
                "title": "Cheap",
                "price": -5,
                "publisherId": publisher["id"],
                "releaseDate": "2022-01-25"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["statusCode"], 422);
    }

    #[tokio::test]
    async fn blank_title_is_422_on_create_and_patch() {
        let app = app();
        let publisher = create_publisher(&app).await;
        let (status, body) = call(
            &app,
            "POST",
            "/games",
            Some(json!({
                "title": "   ",
                "price": 10,
                "publisherId": publisher["id"],
                "releaseDate": "2022-01-25"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body, json!({"statusCode": 422, "message": "title: must not be blank"}));

        let game = create_game(&app, publisher["id"].as_str().unwrap()).await;
        let uri = format!("/games/{}", game["id"].as_str().unwrap());
        let (status, body) = call(&app, "PATCH", &uri, Some(json!({"title": " "}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["statusCode"], 422);

        let (_, unchanged) = call(&app, "GET", &uri, None).await;
        assert_eq!(unchanged["title"], "God of wars 17");
    }

    #[tokio::test]
    async fn malformed_body_is_400() {
        let app = app();
        let request = Request::builder()
            .method("POST")
            .uri("/games")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn get_and_list_games() {
        let app = app();
        let publisher = create_publisher(&app).await;
        let game = create_game(&app, publisher["id"].as_str().unwrap()).await;
        let id = game["id"].as_str().unwrap();

        let (status, found) = call(&app, "GET", &format!("/games/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(found, game);

        let (status, all) = call(&app, "GET", "/games", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(all, json!([game]));
    }

    #[tokio::test]
    async fn unknown_game_is_404_everywhere() {
        let app = app();
        for (method, uri) in [
            ("GET", "/games/nope"),
            ("DELETE", "/games/nope"),
            ("GET", "/games/nope/publisher"),
        ] {
            let (status, body) = call(&app, method, uri, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{} {}", method, uri);
            assert_eq!(body, json!({"statusCode": 404, "message": "Not found"}));
        }

        let (status, _) = call(&app, "PATCH", "/games/nope", Some(json!({"title": "x"}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn patch_merges_fields_and_switches_publisher() {
        let app = app();
        let first = create_publisher(&app).await;
        let second = create_publisher(&app).await;
        let game = create_game(&app, first["id"].as_str().unwrap()).await;
        let id = game["id"].as_str().unwrap();

        let (status, updated) = call(
            &app,
            "PATCH",
            &format!("/games/{}", id),
            Some(json!({"title": "God of wars 18", "publisherId": second["id"]})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["title"], "God of wars 18");
        assert_eq!(updated["price"], game["price"]);
        assert_eq!(updated["tags"], game["tags"]);
        assert_eq!(updated["publisher"], second);

        let (status, publisher) =
            call(&app, "GET", &format!("/games/{}/publisher", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(publisher, second);
    }

    #[tokio::test]
    async fn patch_with_unknown_publisher_is_404() {
        let app = app();
        let publisher = create_publisher(&app).await;
        let game = create_game(&app, publisher["id"].as_str().unwrap()).await;

        let (status, _) = call(
            &app,
            "PATCH",
            &format!("/games/{}", game["id"].as_str().unwrap()),
            Some(json!({"publisherId": "missing"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_returns_empty_object() {
        let app = app();
        let publisher = create_publisher(&app).await;
        let game = create_game(&app, publisher["id"].as_str().unwrap()).await;
        let uri = format!("/games/{}", game["id"].as_str().unwrap());

        let (status, body) = call(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({}));

        let (status, _) = call(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn publishers_can_be_listed_and_fetched() {
        let app = app();
        let publisher = create_publisher(&app).await;
        let id = publisher["id"].as_str().unwrap();

        let (status, found) = call(&app, "GET", &format!("/publishers/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(found, publisher);

        let (_, all) = call(&app, "GET", "/publishers", None).await;
        assert_eq!(all, json!([publisher]));

        let (status, _) = call(&app, "GET", "/publishers/missing", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

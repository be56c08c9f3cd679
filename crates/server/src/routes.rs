use axum::{
    routing::{get, patch},
    Json, Router,
};
use common::types::Health;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod movies;
pub mod search;
pub mod shops;

/// Liveness check
#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// Build the full application router: catalog routes, health and API docs.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let movie_routes = Router::new()
        .route("/movies", get(movies::list).post(movies::create))
        .route(
            "/movies/:id",
            get(movies::get).put(movies::update).delete(movies::delete),
        )
        .route("/movies/:id/move", patch(movies::move_to_shop));

    let shop_routes = Router::new()
        .route("/shops", get(shops::list).post(shops::create))
        .route(
            "/shops/:id",
            get(shops::get).put(shops::update).delete(shops::delete),
        )
        .route("/shops/:id/movies", get(shops::movies))
        .route("/shops/:id/movies/available", get(shops::available_movies));

    let search_routes = Router::new().route("/search/movies", get(search::movies));

    Router::new()
        .route("/health", get(health))
        .merge(movie_routes)
        .merge(shop_routes)
        .merge(search_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // span per request, method and path included
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // status code and latency
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

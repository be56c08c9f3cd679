use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use service::catalog::{MoveInput, Movie, MovieInput, MovieUpdate};
use tracing::info;

use crate::errors::JsonApiError;
use crate::state::AppState;

/// List all movies
#[utoipa::path(get, path = "/movies", tag = "movies", responses((status = 200, description = "All movies in creation order", body = [crate::openapi::MovieDoc])))]
pub async fn list(State(state): State<AppState>) -> Json<Vec<Movie>> {
    Json(state.catalog.list_movies().await)
}

/// Get a movie by id
#[utoipa::path(
    get,
    path = "/movies/{id}",
    tag = "movies",
    params(("id" = u64, Path, description = "Movie id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::MovieDoc),
        (status = 404, description = "Movie not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<u64>) -> Result<Json<Movie>, JsonApiError> {
    Ok(Json(state.catalog.get_movie(id).await?))
}

/// Create a movie in an existing shop
#[utoipa::path(
    post,
    path = "/movies",
    tag = "movies",
    request_body = crate::openapi::MovieCreateDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::MovieDoc),
        (status = 404, description = "Shop not found", body = crate::openapi::ErrorDoc),
        (status = 422, description = "Shop id is not an integer", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<MovieInput>,
) -> Result<(StatusCode, Json<Movie>), JsonApiError> {
    let movie = state.catalog.create_movie(input).await?;
    info!(id = movie.id, shop = movie.shop, name = %movie.name, "movie_create");
    Ok((StatusCode::CREATED, Json(movie)))
}

/// Replace a movie's name, director and genres
#[utoipa::path(
    put,
    path = "/movies/{id}",
    tag = "movies",
    params(("id" = u64, Path, description = "Movie id")),
    request_body = crate::openapi::MovieUpdateDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::MovieDoc),
        (status = 404, description = "Movie not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(input): Json<MovieUpdate>,
) -> Result<Json<Movie>, JsonApiError> {
    Ok(Json(state.catalog.update_movie(id, input).await?))
}

/// Point a movie at another shop.
#[utoipa::path(
    patch,
    path = "/movies/{id}/move",
    tag = "movies",
    params(("id" = u64, Path, description = "Movie id")),
    request_body = crate::openapi::MoveDoc,
    responses(
        (status = 200, description = "Moved", body = crate::openapi::MovieDoc),
        (status = 404, description = "Movie not found, or target shop missing when validated", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn move_to_shop(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(input): Json<MoveInput>,
) -> Result<Json<Movie>, JsonApiError> {
    Ok(Json(state.catalog.move_movie(id, input.shop).await?))
}

/// Delete a movie
#[utoipa::path(
    delete,
    path = "/movies/{id}",
    tag = "movies",
    params(("id" = u64, Path, description = "Movie id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Movie not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<u64>) -> Result<StatusCode, JsonApiError> {
    state.catalog.delete_movie(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

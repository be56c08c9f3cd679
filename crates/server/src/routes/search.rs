use axum::{extract::State, Json};
use axum_extra::extract::Query;
use service::catalog::{Movie, MovieQuery};
use tracing::debug;

use crate::state::AppState;

/// Search movies by name, director and genres.
///
/// `genres` may repeat (`?genres=a&genres=b`), so the form-aware `Query`
/// from axum-extra is used instead of axum's.
#[utoipa::path(
    get,
    path = "/search/movies",
    tag = "search",
    params(
        ("name" = Option<String>, Query, description = "Case-insensitive substring of the name"),
        ("director" = Option<String>, Query, description = "Case-insensitive substring of the director"),
        ("genres" = Option<Vec<String>>, Query, description = "Every listed genre must be present")
    ),
    responses((status = 200, description = "Matching movies in creation order", body = [crate::openapi::MovieDoc]))
)]
pub async fn movies(State(state): State<AppState>, Query(query): Query<MovieQuery>) -> Json<Vec<Movie>> {
    let hits = state.catalog.search_movies(&query).await;
    debug!(?query, hits = hits.len(), "movie_search");
    Json(hits)
}

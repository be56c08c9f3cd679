use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use service::catalog::{Movie, Shop, ShopInput};
use tracing::info;

use crate::errors::JsonApiError;
use crate::state::AppState;

/// List all shops with their movies
#[utoipa::path(get, path = "/shops", tag = "shops", responses((status = 200, description = "All shops in creation order", body = [crate::openapi::ShopDoc])))]
pub async fn list(State(state): State<AppState>) -> Json<Vec<Shop>> {
    Json(state.catalog.list_shops().await)
}

/// Get a shop by id
#[utoipa::path(
    get,
    path = "/shops/{id}",
    tag = "shops",
    params(("id" = u64, Path, description = "Shop id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ShopDoc),
        (status = 404, description = "Shop not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<u64>) -> Result<Json<Shop>, JsonApiError> {
    Ok(Json(state.catalog.get_shop(id).await?))
}

/// Create a shop
#[utoipa::path(post, path = "/shops", tag = "shops", request_body = crate::openapi::ShopInputDoc, responses((status = 201, description = "Created", body = crate::openapi::ShopDoc)))]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<ShopInput>,
) -> Result<(StatusCode, Json<Shop>), JsonApiError> {
    let shop = state.catalog.create_shop(input).await?;
    info!(id = shop.id, address = %shop.address, "shop_create");
    Ok((StatusCode::CREATED, Json(shop)))
}

/// Replace a shop's address and manager
#[utoipa::path(
    put,
    path = "/shops/{id}",
    tag = "shops",
    params(("id" = u64, Path, description = "Shop id")),
    request_body = crate::openapi::ShopInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ShopDoc),
        (status = 404, description = "Shop not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(input): Json<ShopInput>,
) -> Result<Json<Shop>, JsonApiError> {
    Ok(Json(state.catalog.update_shop(id, input).await?))
}

/// Delete a shop according to the configured policy
#[utoipa::path(
    delete,
    path = "/shops/{id}",
    tag = "shops",
    params(("id" = u64, Path, description = "Shop id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Shop not found", body = crate::openapi::ErrorDoc),
        (status = 409, description = "Shop still has movies (reject policy)", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<u64>) -> Result<StatusCode, JsonApiError> {
    state.catalog.delete_shop(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List movies held by a shop
#[utoipa::path(
    get,
    path = "/shops/{id}/movies",
    tag = "shops",
    params(("id" = u64, Path, description = "Shop id")),
    responses(
        (status = 200, description = "Movies held by the shop", body = [crate::openapi::MovieDoc]),
        (status = 404, description = "Shop not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn movies(State(state): State<AppState>, Path(id): Path<u64>) -> Result<Json<Vec<Movie>>, JsonApiError> {
    Ok(Json(state.catalog.list_movies_by_shop(id).await?))
}

/// List a shop's movies that are not rented
#[utoipa::path(
    get,
    path = "/shops/{id}/movies/available",
    tag = "shops",
    params(("id" = u64, Path, description = "Shop id")),
    responses(
        (status = 200, description = "Movies held by the shop and not rented", body = [crate::openapi::MovieDoc]),
        (status = 404, description = "Shop not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn available_movies(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Vec<Movie>>, JsonApiError> {
    Ok(Json(state.catalog.list_available_movies_by_shop(id).await?))
}

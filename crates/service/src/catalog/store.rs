use async_trait::async_trait;

use super::domain::{Movie, MovieInput, MovieUpdate, Shop, ShopInput};
use super::search::MovieQuery;
use crate::errors::ServiceError;

/// Storage seam for the catalog. Handlers only see this trait so tests and
/// alternative backends can be swapped in.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn list_movies(&self) -> Vec<Movie>;
    async fn get_movie(&self, id: u64) -> Result<Movie, ServiceError>;
    async fn create_movie(&self, input: MovieInput) -> Result<Movie, ServiceError>;
    async fn update_movie(&self, id: u64, input: MovieUpdate) -> Result<Movie, ServiceError>;
    async fn delete_movie(&self, id: u64) -> Result<(), ServiceError>;
    async fn move_movie(&self, id: u64, shop: u64) -> Result<Movie, ServiceError>;
    async fn search_movies(&self, query: &MovieQuery) -> Vec<Movie>;

    async fn list_shops(&self) -> Vec<Shop>;
    async fn get_shop(&self, id: u64) -> Result<Shop, ServiceError>;
    async fn create_shop(&self, input: ShopInput) -> Result<Shop, ServiceError>;
    async fn update_shop(&self, id: u64, input: ShopInput) -> Result<Shop, ServiceError>;
    async fn delete_shop(&self, id: u64) -> Result<(), ServiceError>;

    async fn list_movies_by_shop(&self, shop_id: u64) -> Result<Vec<Movie>, ServiceError> {
        Ok(self.get_shop(shop_id).await?.movies)
    }

    /// Movies of the shop that are not rented out.
    async fn list_available_movies_by_shop(&self, shop_id: u64) -> Result<Vec<Movie>, ServiceError> {
        let movies = self.list_movies_by_shop(shop_id).await?;
        Ok(movies.into_iter().filter(|m| !m.rent).collect())
    }
}

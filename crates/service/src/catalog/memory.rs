use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use configs::{ShopDeletePolicy, StoreConfig};
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::domain::{Movie, MovieInput, MovieUpdate, Shop, ShopInput};
use super::search::MovieQuery;
use super::store::CatalogStore;
use crate::errors::{ServiceError, MOVIE, SHOP};

#[derive(Clone, Debug)]
struct ShopRecord {
    id: u64,
    address: String,
    manager: String,
}

/// Both collections and their id counters. Ids only grow, so the
/// `BTreeMap` order is insertion order.
#[derive(Debug, Default)]
struct CatalogState {
    movies: BTreeMap<u64, Movie>,
    shops: BTreeMap<u64, ShopRecord>,
    last_movie_id: u64,
    last_shop_id: u64,
}

impl CatalogState {
    fn next_movie_id(&mut self) -> u64 {
        self.last_movie_id += 1;
        self.last_movie_id
    }

    fn next_shop_id(&mut self) -> u64 {
        self.last_shop_id += 1;
        self.last_shop_id
    }

    fn movies_of(&self, shop_id: u64) -> impl Iterator<Item = &Movie> {
        self.movies.values().filter(move |m| m.shop == shop_id)
    }

    fn shop_view(&self, rec: &ShopRecord) -> Shop {
        Shop {
            id: rec.id,
            address: rec.address.clone(),
            manager: rec.manager.clone(),
            movies: self.movies_of(rec.id).cloned().collect(),
        }
    }
}

/// Process-local catalog. A single lock guards movies, shops and counters
/// so every mutation is applied as one step.
pub struct InMemoryCatalog {
    inner: RwLock<CatalogState>,
    options: StoreConfig,
}

impl InMemoryCatalog {
    pub fn new(options: StoreConfig) -> Arc<Self> {
        Arc::new(Self { inner: RwLock::new(CatalogState::default()), options })
    }
}

fn missing(entity: &str, id: u64) -> ServiceError {
    debug!(entity, id, "lookup miss");
    ServiceError::not_found(entity)
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
    async fn list_movies(&self) -> Vec<Movie> {
        let state = self.inner.read().await;
        state.movies.values().cloned().collect()
    }

    async fn get_movie(&self, id: u64) -> Result<Movie, ServiceError> {
        let state = self.inner.read().await;
        state.movies.get(&id).cloned().ok_or_else(|| missing(MOVIE, id))
    }

    async fn create_movie(&self, input: MovieInput) -> Result<Movie, ServiceError> {
        let shop_id = input.shop.resolve()?;
        let mut state = self.inner.write().await;
        if !state.shops.contains_key(&shop_id) {
            return Err(missing(SHOP, shop_id));
        }
        let movie = Movie {
            id: state.next_movie_id(),
            name: input.name,
            director: input.director,
            genres: input.genres,
            shop: shop_id,
            rent: false,
        };
        state.movies.insert(movie.id, movie.clone());
        info!(movie_id = movie.id, shop_id, "movie created");
        Ok(movie)
    }

    async fn update_movie(&self, id: u64, input: MovieUpdate) -> Result<Movie, ServiceError> {
        let mut state = self.inner.write().await;
        let movie = state.movies.get_mut(&id).ok_or_else(|| missing(MOVIE, id))?;
        movie.name = input.name;
        movie.director = input.director;
        movie.genres = input.genres;
        if let Some(rent) = input.rent {
            movie.rent = rent;
        }
        info!(movie_id = id, rent = movie.rent, "movie updated");
        Ok(movie.clone())
    }

    async fn delete_movie(&self, id: u64) -> Result<(), ServiceError> {
        let mut state = self.inner.write().await;
        state.movies.remove(&id).ok_or_else(|| missing(MOVIE, id))?;
        info!(movie_id = id, "movie deleted");
        Ok(())
    }

    async fn move_movie(&self, id: u64, shop: u64) -> Result<Movie, ServiceError> {
        let mut state = self.inner.write().await;
        if !state.movies.contains_key(&id) {
            return Err(missing(MOVIE, id));
        }
        if self.options.validate_move_target && !state.shops.contains_key(&shop) {
            return Err(missing(SHOP, shop));
        }
        let movie = state.movies.get_mut(&id).ok_or_else(|| missing(MOVIE, id))?;
        let from = movie.shop;
        movie.shop = shop;
        info!(movie_id = id, from, to = shop, "movie moved");
        Ok(movie.clone())
    }

    async fn search_movies(&self, query: &MovieQuery) -> Vec<Movie> {
        let state = self.inner.read().await;
        state.movies.values().filter(|m| query.matches(m)).cloned().collect()
    }

    async fn list_shops(&self) -> Vec<Shop> {
        let state = self.inner.read().await;
        state.shops.values().map(|rec| state.shop_view(rec)).collect()
    }

    async fn get_shop(&self, id: u64) -> Result<Shop, ServiceError> {
        let state = self.inner.read().await;
        let rec = state.shops.get(&id).ok_or_else(|| missing(SHOP, id))?;
        Ok(state.shop_view(rec))
    }

    async fn create_shop(&self, input: ShopInput) -> Result<Shop, ServiceError> {
        let mut state = self.inner.write().await;
        let rec = ShopRecord { id: state.next_shop_id(), address: input.address, manager: input.manager };
        state.shops.insert(rec.id, rec.clone());
        info!(shop_id = rec.id, "shop created");
        Ok(state.shop_view(&rec))
    }

    async fn update_shop(&self, id: u64, input: ShopInput) -> Result<Shop, ServiceError> {
        let mut state = self.inner.write().await;
        let rec = state.shops.get_mut(&id).ok_or_else(|| missing(SHOP, id))?;
        rec.address = input.address;
        rec.manager = input.manager;
        let rec = rec.clone();
        info!(shop_id = id, "shop updated");
        Ok(state.shop_view(&rec))
    }

    async fn delete_shop(&self, id: u64) -> Result<(), ServiceError> {
        let mut state = self.inner.write().await;
        if !state.shops.contains_key(&id) {
            return Err(missing(SHOP, id));
        }
        let referencing = state.movies_of(id).count();
        match self.options.shop_delete_policy {
            ShopDeletePolicy::Reject if referencing > 0 => {
                return Err(ServiceError::conflict(SHOP, "still has movies"));
            }
            ShopDeletePolicy::Cascade => {
                state.movies.retain(|_, m| m.shop != id);
            }
            _ => {}
        }
        state.shops.remove(&id);
        info!(shop_id = id, movies = referencing, policy = ?self.options.shop_delete_policy, "shop deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::domain::ShopRef;

    fn shop_input(address: &str, manager: &str) -> ShopInput {
        ShopInput { address: address.into(), manager: manager.into() }
    }

    fn movie_input(name: &str, director: &str, genres: &[&str], shop: impl Into<ShopRef>) -> MovieInput {
        MovieInput {
            name: name.into(),
            director: director.into(),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            shop: shop.into(),
        }
    }

    fn with_policy(policy: ShopDeletePolicy) -> Arc<InMemoryCatalog> {
        InMemoryCatalog::new(StoreConfig { shop_delete_policy: policy, ..Default::default() })
    }

    #[tokio::test]
    async fn create_then_get_returns_supplied_fields() -> Result<(), ServiceError> {
        let store = InMemoryCatalog::new(StoreConfig::default());
        let shop = store.create_shop(shop_input("Main St", "Ann")).await?;
        assert_eq!(shop.id, 1);
        assert!(shop.movies.is_empty());

        let created = store.create_movie(movie_input("Up", "Docter", &["Animation"], shop.id)).await?;
        assert_eq!(created.id, 1);
        assert!(!created.rent);

        let fetched = store.get_movie(created.id).await?;
        assert_eq!(fetched, created);
        assert_eq!(fetched.name, "Up");
        assert_eq!(fetched.director, "Docter");
        assert_eq!(fetched.genres, vec!["Animation".to_string()]);
        assert_eq!(fetched.shop, 1);
        Ok(())
    }

    #[tokio::test]
    async fn create_with_unknown_or_malformed_shop_leaves_movies_untouched() -> Result<(), ServiceError> {
        let store = InMemoryCatalog::new(StoreConfig::default());
        let err = store.create_movie(movie_input("Up", "Docter", &[], 7u64)).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        let err = store
            .create_movie(movie_input("Up", "Docter", &[], ShopRef::Text("seven".into())))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidReference(_)));
        assert!(store.list_movies().await.is_empty());

        // failed creates must not burn ids
        let shop = store.create_shop(shop_input("Main St", "Ann")).await?;
        let movie = store.create_movie(movie_input("Up", "Docter", &[], ShopRef::Text("1".into()))).await?;
        assert_eq!(shop.id, 1);
        assert_eq!(movie.id, 1);
        Ok(())
    }

    #[tokio::test]
    async fn ids_are_never_reused() -> Result<(), ServiceError> {
        let store = InMemoryCatalog::new(StoreConfig::default());
        let shop = store.create_shop(shop_input("Main St", "Ann")).await?;
        let first = store.create_movie(movie_input("A", "X", &[], shop.id)).await?;
        store.delete_movie(first.id).await?;
        let second = store.create_movie(movie_input("B", "Y", &[], shop.id)).await?;
        assert_eq!(second.id, first.id + 1);

        store.delete_shop(shop.id).await?;
        let next_shop = store.create_shop(shop_input("Side St", "Bob")).await?;
        assert_eq!(next_shop.id, 2);
        Ok(())
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() -> Result<(), ServiceError> {
        let store = InMemoryCatalog::new(StoreConfig::default());
        let shop = store.create_shop(shop_input("Main St", "Ann")).await?;
        let movie = store.create_movie(movie_input("Up", "Docter", &[], shop.id)).await?;
        store.delete_movie(movie.id).await?;
        assert!(matches!(store.get_movie(movie.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(store.delete_movie(movie.id).await, Err(ServiceError::NotFound(_))));
        assert!(store.list_movies_by_shop(shop.id).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn update_replaces_fields_but_keeps_id_and_shop() -> Result<(), ServiceError> {
        let store = InMemoryCatalog::new(StoreConfig::default());
        let shop = store.create_shop(shop_input("Main St", "Ann")).await?;
        let movie = store.create_movie(movie_input("Up", "Docter", &["Animation"], shop.id)).await?;

        let updated = store
            .update_movie(
                movie.id,
                MovieUpdate { name: "Up!".into(), director: "Pete Docter".into(), genres: vec![], rent: None },
            )
            .await?;
        assert_eq!(updated.id, movie.id);
        assert_eq!(updated.shop, shop.id);
        assert_eq!(updated.name, "Up!");
        assert!(updated.genres.is_empty());
        assert!(!updated.rent);

        let rented = store
            .update_movie(
                movie.id,
                MovieUpdate { name: "Up!".into(), director: "Pete Docter".into(), genres: vec![], rent: Some(true) },
            )
            .await?;
        assert!(rented.rent);

        let missing = store
            .update_movie(99, MovieUpdate { name: "x".into(), director: "y".into(), genres: vec![], rent: None })
            .await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn move_does_not_validate_target_by_default() -> Result<(), ServiceError> {
        let store = InMemoryCatalog::new(StoreConfig::default());
        let shop = store.create_shop(shop_input("Main St", "Ann")).await?;
        let movie = store.create_movie(movie_input("Up", "Docter", &[], shop.id)).await?;

        let moved = store.move_movie(movie.id, 2).await?;
        assert_eq!(moved.shop, 2);
        assert!(store.list_movies_by_shop(shop.id).await?.is_empty());
        assert!(matches!(store.move_movie(42, 1).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn move_validates_target_when_configured() -> Result<(), ServiceError> {
        let store = InMemoryCatalog::new(StoreConfig { validate_move_target: true, ..Default::default() });
        let a = store.create_shop(shop_input("Main St", "Ann")).await?;
        let b = store.create_shop(shop_input("Side St", "Bob")).await?;
        let movie = store.create_movie(movie_input("Up", "Docter", &[], a.id)).await?;

        assert!(matches!(store.move_movie(movie.id, 9).await, Err(ServiceError::NotFound(_))));
        assert_eq!(store.get_movie(movie.id).await?.shop, a.id);

        store.move_movie(movie.id, b.id).await?;
        assert!(store.list_movies_by_shop(a.id).await?.is_empty());
        assert_eq!(store.list_movies_by_shop(b.id).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn available_movies_are_the_unrented_subset() -> Result<(), ServiceError> {
        let store = InMemoryCatalog::new(StoreConfig::default());
        let shop = store.create_shop(shop_input("Main St", "Ann")).await?;
        let up = store.create_movie(movie_input("Up", "Docter", &[], shop.id)).await?;
        let cars = store.create_movie(movie_input("Cars", "Lasseter", &[], shop.id)).await?;
        store
            .update_movie(cars.id, MovieUpdate { name: cars.name.clone(), director: cars.director.clone(), genres: vec![], rent: Some(true) })
            .await?;

        let all = store.list_movies_by_shop(shop.id).await?;
        let available = store.list_available_movies_by_shop(shop.id).await?;
        assert_eq!(all.len(), 2);
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].id, up.id);
        assert!(available.iter().all(|m| !m.rent && all.contains(m)));

        assert!(matches!(store.list_movies_by_shop(5).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(store.list_available_movies_by_shop(5).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn search_filters_compose_and_keep_order() -> Result<(), ServiceError> {
        let store = InMemoryCatalog::new(StoreConfig::default());
        let shop = store.create_shop(shop_input("Main St", "Ann")).await?;
        store.create_movie(movie_input("The Matrix", "Wachowski", &["Sci-Fi", "Action"], shop.id)).await?;
        store.create_movie(movie_input("Up", "Docter", &["Animation"], shop.id)).await?;
        store.create_movie(movie_input("Matrix Reloaded", "Wachowski", &["Sci-Fi"], shop.id)).await?;

        let all = store.search_movies(&MovieQuery::default()).await;
        assert_eq!(all, store.list_movies().await);

        let hits = store.search_movies(&MovieQuery { name: Some("Matrix".into()), ..Default::default() }).await;
        let names: Vec<_> = hits.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["The Matrix", "Matrix Reloaded"]);

        let hits = store
            .search_movies(&MovieQuery {
                director: Some("wachowski".into()),
                genres: vec!["Action".into()],
                ..Default::default()
            })
            .await;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "The Matrix");
        Ok(())
    }

    #[tokio::test]
    async fn shop_update_touches_address_and_manager_only() -> Result<(), ServiceError> {
        let store = InMemoryCatalog::new(StoreConfig::default());
        let shop = store.create_shop(shop_input("Main St", "Ann")).await?;
        store.create_movie(movie_input("Up", "Docter", &[], shop.id)).await?;

        let updated = store.update_shop(shop.id, shop_input("High St", "Bea")).await?;
        assert_eq!(updated.id, shop.id);
        assert_eq!(updated.address, "High St");
        assert_eq!(updated.manager, "Bea");
        assert_eq!(updated.movies.len(), 1);
        assert!(matches!(store.update_shop(3, shop_input("a", "b")).await, Err(ServiceError::NotFound(_))));
        assert_eq!(store.list_shops().await, vec![updated]);
        Ok(())
    }

    #[tokio::test]
    async fn delete_shop_keeps_dangling_movies_by_default() -> Result<(), ServiceError> {
        let store = with_policy(ShopDeletePolicy::Keep);
        let shop = store.create_shop(shop_input("Main St", "Ann")).await?;
        let movie = store.create_movie(movie_input("Up", "Docter", &[], shop.id)).await?;

        store.delete_shop(shop.id).await?;
        assert!(matches!(store.get_shop(shop.id).await, Err(ServiceError::NotFound(_))));
        assert_eq!(store.get_movie(movie.id).await?.shop, shop.id);
        assert!(matches!(store.delete_shop(shop.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn delete_shop_rejects_when_movies_remain() -> Result<(), ServiceError> {
        let store = with_policy(ShopDeletePolicy::Reject);
        let shop = store.create_shop(shop_input("Main St", "Ann")).await?;
        let movie = store.create_movie(movie_input("Up", "Docter", &[], shop.id)).await?;

        assert!(matches!(store.delete_shop(shop.id).await, Err(ServiceError::Conflict(_))));
        assert!(store.get_shop(shop.id).await.is_ok());

        store.delete_movie(movie.id).await?;
        store.delete_shop(shop.id).await?;
        assert!(store.list_shops().await.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn delete_shop_cascades_when_configured() -> Result<(), ServiceError> {
        let store = with_policy(ShopDeletePolicy::Cascade);
        let a = store.create_shop(shop_input("Main St", "Ann")).await?;
        let b = store.create_shop(shop_input("Side St", "Bob")).await?;
        let gone = store.create_movie(movie_input("Up", "Docter", &[], a.id)).await?;
        let kept = store.create_movie(movie_input("Cars", "Lasseter", &[], b.id)).await?;

        store.delete_shop(a.id).await?;
        assert!(matches!(store.get_movie(gone.id).await, Err(ServiceError::NotFound(_))));
        assert_eq!(store.list_movies().await, vec![kept]);
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_creates_get_distinct_ids() -> anyhow::Result<()> {
        let store = InMemoryCatalog::new(StoreConfig::default());
        let shop_id = store.create_shop(shop_input("Main St", "Ann")).await?.id;
        let mut handles = Vec::new();
        for i in 0..16 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.create_movie(movie_input(&format!("m{i}"), "d", &[], shop_id)).await
            }));
        }
        let mut ids = Vec::new();
        for h in handles {
            ids.push(h.await??.id);
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 16);
        assert_eq!(store.get_shop(shop_id).await?.movies.len(), 16);
        Ok(())
    }
}

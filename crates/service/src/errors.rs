use thiserror::Error;

pub const MOVIE: &str = "movie";
pub const SHOP: &str = "shop";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    InvalidReference(String),
    #[error("{0}")]
    Conflict(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn invalid_reference(entity: &str) -> Self { Self::InvalidReference(format!("invalid {} reference", entity)) }

    pub fn conflict(entity: &str, detail: &str) -> Self { Self::Conflict(format!("{} {}", entity, detail)) }
}

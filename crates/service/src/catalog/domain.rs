use std::num::IntErrorKind;

use serde::{Deserialize, Serialize};

use crate::errors::{ServiceError, SHOP};

/// A movie held by exactly one shop.
/// - `genres` also accepts the legacy `gender` key on input
/// - `rent` is false until an update says otherwise
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Movie {
    pub id: u64,
    pub name: String,
    pub director: String,
    #[serde(alias = "gender")]
    pub genres: Vec<String>,
    pub shop: u64,
    #[serde(default)]
    pub rent: bool,
}

/// A shop together with the movies currently pointing at it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Shop {
    pub id: u64,
    pub address: String,
    pub manager: String,
    #[serde(default)]
    pub movies: Vec<Movie>,
}

/// Shop identifier as sent by clients: either a JSON number or text.
/// Variant order matters for untagged matching: non-negative numbers land
/// in `Id`, negative ones in `Negative`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ShopRef {
    Id(u64),
    Negative(i64),
    Text(String),
}

impl ShopRef {
    /// Parse into a shop id. Only text that is not an integer is an invalid
    /// reference; integers that cannot name a shop (negative or too large)
    /// are simply not found.
    pub fn resolve(&self) -> Result<u64, ServiceError> {
        match self {
            ShopRef::Id(id) => Ok(*id),
            ShopRef::Negative(_) => Err(ServiceError::not_found(SHOP)),
            ShopRef::Text(text) => parse_shop_id(text.trim()),
        }
    }
}

fn parse_shop_id(text: &str) -> Result<u64, ServiceError> {
    match text.parse::<u64>() {
        Ok(id) => Ok(id),
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            Err(ServiceError::not_found(SHOP))
        }
        Err(_) => match text.strip_prefix('-') {
            Some(digits) if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
                Err(ServiceError::not_found(SHOP))
            }
            _ => Err(ServiceError::invalid_reference(SHOP)),
        },
    }
}

impl From<u64> for ShopRef {
    fn from(id: u64) -> Self {
        ShopRef::Id(id)
    }
}

/// Create payload: id and rented flag are assigned by the store.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieInput {
    pub name: String,
    pub director: String,
    #[serde(alias = "gender")]
    pub genres: Vec<String>,
    pub shop: ShopRef,
}

/// Full replacement of the descriptive fields; `rent` only when present.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieUpdate {
    pub name: String,
    pub director: String,
    #[serde(alias = "gender")]
    pub genres: Vec<String>,
    #[serde(default)]
    pub rent: Option<bool>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoveInput {
    pub shop: u64,
}

/// Create and update payload for shops.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShopInput {
    pub address: String,
    pub manager: String,
}

use serde::{Deserialize, Serialize};

use super::domain::Movie;

/// Movie search filters. Every present filter must match; absent or empty
/// ones are ignored.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieQuery {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default, alias = "gender")]
    pub genres: Vec<String>,
}

impl MovieQuery {
    pub fn matches(&self, movie: &Movie) -> bool {
        contains_ci(&movie.name, self.name.as_deref())
            && contains_ci(&movie.director, self.director.as_deref())
            && self
                .genres
                .iter()
                .filter(|g| !g.is_empty())
                .all(|g| movie.genres.contains(g))
    }
}

fn contains_ci(haystack: &str, needle: Option<&str>) -> bool {
    match needle {
        Some(n) if !n.is_empty() => haystack.to_lowercase().contains(&n.to_lowercase()),
        _ => true,
    }
}

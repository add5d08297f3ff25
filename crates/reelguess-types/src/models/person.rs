use serde::{Deserialize, Serialize};

use super::serde_util::null_as_empty;
use super::title::{Movie, TvShow};
use crate::{EntityKey, MediaKind};

/// A person from the popular-people and search endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default)]
    pub profile_path: Option<String>,
    #[serde(default)]
    pub known_for_department: Option<String>,
    #[serde(default)]
    pub known_for: Vec<KnownFor>,
}

/// A notable title attached to a person, tagged by the API's `media_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "media_type", rename_all = "snake_case")]
pub enum KnownFor {
    Movie(Movie),
    Tv(TvShow),
}

impl KnownFor {
    pub fn key(&self) -> EntityKey {
        match self {
            KnownFor::Movie(movie) => EntityKey::new(MediaKind::Movie, movie.id),
            KnownFor::Tv(show) => EntityKey::new(MediaKind::Tv, show.id),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            KnownFor::Movie(movie) => &movie.title,
            KnownFor::Tv(show) => &show.name,
        }
    }

    pub fn poster_path(&self) -> Option<&str> {
        match self {
            KnownFor::Movie(movie) => movie.poster_path.as_deref(),
            KnownFor::Tv(show) => show.poster_path.as_deref(),
        }
    }
}

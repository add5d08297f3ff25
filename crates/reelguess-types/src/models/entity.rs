use serde::{Deserialize, Serialize};

use super::person::{KnownFor, Person};
use super::title::{Movie, TvShow};
use crate::{EntityKey, MediaKind};

/// Anything that can sit behind a poster.
///
/// Screens match on the variant instead of down-casting; the shared accessors
/// cover what grids and shadow records need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "media_type", rename_all = "snake_case")]
pub enum Entity {
    Movie(Movie),
    Tv(TvShow),
    Person(Person),
}

impl Entity {
    pub fn kind(&self) -> MediaKind {
        match self {
            Entity::Movie(_) => MediaKind::Movie,
            Entity::Tv(_) => MediaKind::Tv,
            Entity::Person(_) => MediaKind::Person,
        }
    }

    pub fn id(&self) -> u64 {
        match self {
            Entity::Movie(movie) => movie.id,
            Entity::Tv(show) => show.id,
            Entity::Person(person) => person.id,
        }
    }

    pub fn key(&self) -> EntityKey {
        EntityKey::new(self.kind(), self.id())
    }

    pub fn poster_path(&self) -> Option<&str> {
        match self {
            Entity::Movie(movie) => movie.poster_path.as_deref(),
            Entity::Tv(show) => show.poster_path.as_deref(),
            Entity::Person(person) => person.profile_path.as_deref(),
        }
    }

    /// The answer the player has to guess.
    pub fn display_name(&self) -> &str {
        match self {
            Entity::Movie(movie) => &movie.title,
            Entity::Tv(show) => &show.name,
            Entity::Person(person) => &person.name,
        }
    }

    pub fn overview(&self) -> &str {
        match self {
            Entity::Movie(movie) => &movie.overview,
            Entity::Tv(show) => &show.overview,
            Entity::Person(_) => "",
        }
    }

    pub fn genre_ids(&self) -> Vec<u64> {
        match self {
            Entity::Movie(movie) => movie.all_genre_ids(),
            Entity::Tv(show) => show.all_genre_ids(),
            Entity::Person(_) => Vec::new(),
        }
    }

    pub fn release_year(&self) -> Option<i32> {
        match self {
            Entity::Movie(movie) => movie.release_year(),
            Entity::Tv(show) => show.release_year(),
            Entity::Person(_) => None,
        }
    }

    pub fn vote_average(&self) -> Option<f64> {
        match self {
            Entity::Movie(movie) => Some(movie.vote_average),
            Entity::Tv(show) => Some(show.vote_average),
            Entity::Person(_) => None,
        }
    }
}

impl From<Movie> for Entity {
    fn from(movie: Movie) -> Self {
        Entity::Movie(movie)
    }
}

impl From<TvShow> for Entity {
    fn from(show: TvShow) -> Self {
        Entity::Tv(show)
    }
}

impl From<Person> for Entity {
    fn from(person: Person) -> Self {
        Entity::Person(person)
    }
}

impl From<KnownFor> for Entity {
    fn from(known_for: KnownFor) -> Self {
        match known_for {
            KnownFor::Movie(movie) => Entity::Movie(movie),
            KnownFor::Tv(show) => Entity::Tv(show),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie() -> Movie {
        serde_json::from_str(
            r#"{"id": 27205, "title": "Inception", "poster_path": "/p.jpg",
                "overview": "Inception tells a story", "genre_ids": [28]}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_shared_accessors() {
        let entity = Entity::from(movie());
        assert_eq!(entity.key(), EntityKey::movie(27205));
        assert_eq!(entity.poster_path(), Some("/p.jpg"));
        assert_eq!(entity.display_name(), "Inception");
        assert_eq!(entity.genre_ids(), vec![28]);
    }

    #[test]
    fn test_serialized_entity_is_tagged() {
        let json = serde_json::to_value(Entity::from(movie())).unwrap();
        assert_eq!(json["media_type"], "movie");
        let back: Entity = serde_json::from_value(json).unwrap();
        assert_eq!(back.kind(), MediaKind::Movie);
    }
}

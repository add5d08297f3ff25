//! Operations of the metadata API.

use reelguess_types::{EntityKey, MediaKind};

use crate::request::Parameters;

/// One API operation. Knows its path and its operation-specific parameters;
/// the client adds the api key and language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// Official genre list for movies or TV
    GenreList(MediaKind),
    /// Popular titles, optionally restricted to one genre. For people this is
    /// the popular-people list.
    Discover {
        kind: MediaKind,
        genre: Option<u64>,
        page: u32,
    },
    Details(EntityKey),
    /// Cast and crew of a title; for a person, their combined credits
    Credits(EntityKey),
    PersonCredits(u64),
    PopularPeople {
        page: u32,
    },
    Search {
        kind: MediaKind,
        query: String,
        page: u32,
    },
}

impl Endpoint {
    /// Discover with the API's raw genre id. Any negative id (the `-1`
    /// "all genres" sentinel) means no genre filter at all.
    pub fn discover(kind: MediaKind, genre_id: i64, page: u32) -> Self {
        Endpoint::Discover {
            kind,
            genre: u64::try_from(genre_id).ok(),
            page: page.max(1),
        }
    }

    pub fn search(kind: MediaKind, query: impl Into<String>, page: u32) -> Self {
        Endpoint::Search {
            kind,
            query: query.into(),
            page: page.max(1),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Endpoint::GenreList(kind) => format!("/genre/{}/list", kind),
            Endpoint::Discover {
                kind: MediaKind::Person,
                ..
            }
            | Endpoint::PopularPeople { .. } => "/person/popular".to_string(),
            Endpoint::Discover { kind, .. } => format!("/discover/{}", kind),
            Endpoint::Details(key) => format!("/{}/{}", key.kind, key.id),
            Endpoint::Credits(key) if key.kind == MediaKind::Person => {
                format!("/person/{}/combined_credits", key.id)
            }
            Endpoint::Credits(key) => format!("/{}/{}/credits", key.kind, key.id),
            Endpoint::PersonCredits(id) => format!("/person/{}/combined_credits", id),
            Endpoint::Search { kind, .. } => format!("/search/{}", kind),
        }
    }

    pub fn page(&self) -> Option<u32> {
        match self {
            Endpoint::Discover { page, .. }
            | Endpoint::PopularPeople { page }
            | Endpoint::Search { page, .. } => Some(*page),
            _ => None,
        }
    }

    /// Operation parameters (without api key or language).
    pub fn parameters(&self) -> Parameters {
        let mut params = Parameters::new();
        if let Some(page) = self.page() {
            params.insert("page", page);
        }
        match self {
            Endpoint::Discover {
                kind: MediaKind::Movie | MediaKind::Tv,
                genre,
                ..
            } => {
                params.insert("sort_by", "popularity.desc");
                params.insert("include_adult", false);
                if let Some(genre) = genre {
                    params.insert("with_genres", *genre);
                }
            }
            Endpoint::Search { query, .. } => {
                params.insert("query", query.as_str());
                params.insert("include_adult", false);
            }
            _ => {}
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_without_genre_omits_filter() {
        let endpoint = Endpoint::discover(MediaKind::Movie, -1, 1);
        assert_eq!(endpoint.path(), "/discover/movie");
        let params = endpoint.parameters();
        assert!(!params.contains("with_genres"));
        assert_eq!(params.get("page"), Some(&serde_json::json!(1)));
    }

    #[test]
    fn test_discover_with_genre() {
        let endpoint = Endpoint::discover(MediaKind::Tv, 18, 3);
        assert_eq!(endpoint.path(), "/discover/tv");
        let params = endpoint.parameters();
        assert_eq!(params.get("with_genres"), Some(&serde_json::json!(18)));
        assert_eq!(params.get("page"), Some(&serde_json::json!(3)));
    }

    #[test]
    fn test_page_zero_is_clamped() {
        assert_eq!(Endpoint::discover(MediaKind::Movie, -1, 0).page(), Some(1));
    }

    #[test]
    fn test_paths() {
        assert_eq!(Endpoint::GenreList(MediaKind::Tv).path(), "/genre/tv/list");
        assert_eq!(
            Endpoint::Credits(EntityKey::movie(27205)).path(),
            "/movie/27205/credits"
        );
        assert_eq!(
            Endpoint::Credits(EntityKey::person(525)).path(),
            "/person/525/combined_credits"
        );
        assert_eq!(
            Endpoint::PersonCredits(525).path(),
            "/person/525/combined_credits"
        );
        assert_eq!(Endpoint::PopularPeople { page: 1 }.path(), "/person/popular");
        assert_eq!(
            Endpoint::discover(MediaKind::Person, 5, 1).path(),
            "/person/popular"
        );
        assert_eq!(Endpoint::Details(EntityKey::tv(1399)).path(), "/tv/1399");
        assert_eq!(
            Endpoint::search(MediaKind::Person, "nolan", 1).path(),
            "/search/person"
        );
    }

    #[test]
    fn test_genre_list_is_not_paginated() {
        let params = Endpoint::GenreList(MediaKind::Movie).parameters();
        assert!(params.is_empty());
    }
}

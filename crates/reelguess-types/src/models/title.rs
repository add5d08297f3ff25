use serde::{Deserialize, Serialize};

use super::genre::Genre;
use super::serde_util::{empty_as_none, null_as_empty, null_as_zero, year_of};

/// A movie as returned by discover, search, details and known-for lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub release_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub vote_average: f64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub overview: String,
    #[serde(default)]
    pub genre_ids: Vec<u64>,
    /// Only present on the details endpoint, which sends full genres instead of ids.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub genres: Vec<Genre>,
}

impl Movie {
    pub fn release_year(&self) -> Option<i32> {
        year_of(self.release_date.as_deref())
    }

    pub fn all_genre_ids(&self) -> Vec<u64> {
        merged_genre_ids(&self.genre_ids, &self.genres)
    }
}

/// A TV show. Same shape as [`Movie`] with the API's tv field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TvShow {
    pub id: u64,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub first_air_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub vote_average: f64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub overview: String,
    #[serde(default)]
    pub genre_ids: Vec<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub genres: Vec<Genre>,
}

impl TvShow {
    pub fn release_year(&self) -> Option<i32> {
        year_of(self.first_air_date.as_deref())
    }

    pub fn all_genre_ids(&self) -> Vec<u64> {
        merged_genre_ids(&self.genre_ids, &self.genres)
    }
}

fn merged_genre_ids(ids: &[u64], genres: &[Genre]) -> Vec<u64> {
    let mut merged = ids.to_vec();
    for genre in genres {
        if !merged.contains(&genre.id) {
            merged.push(genre.id);
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_from_discover_payload() {
        let json = r#"{
            "adult": false,
            "genre_ids": [28, 878],
            "id": 27205,
            "original_title": "Inception",
            "overview": "Cobb steals secrets.",
            "poster_path": "/oYuLEt3zVCKq57qu2F8dT7NIa6f.jpg",
            "release_date": "2010-07-15",
            "title": "Inception",
            "vote_average": 8.4
        }"#;

        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.id, 27205);
        assert_eq!(movie.title, "Inception");
        assert_eq!(movie.release_year(), Some(2010));
        assert_eq!(movie.all_genre_ids(), vec![28, 878]);
    }

    #[test]
    fn test_movie_tolerates_nulls_and_empty_dates() {
        let json = r#"{"id": 1, "title": "Untitled", "poster_path": null,
                       "release_date": "", "overview": null, "vote_average": null}"#;

        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.poster_path, None);
        assert_eq!(movie.release_date, None);
        assert_eq!(movie.overview, "");
        assert_eq!(movie.vote_average, 0.0);
        assert!(movie.genre_ids.is_empty());
    }

    #[test]
    fn test_details_genres_merge_into_ids() {
        let json = r#"{"id": 1399, "name": "Game of Thrones", "first_air_date": "2011-04-17",
                       "genres": [{"id": 18, "name": "Drama"}, {"id": 10765, "name": "Sci-Fi & Fantasy"}]}"#;

        let show: TvShow = serde_json::from_str(json).unwrap();
        assert_eq!(show.release_year(), Some(2011));
        assert_eq!(show.all_genre_ids(), vec![18, 10765]);
    }
}

use serde::{Deserialize, Serialize};

use super::serde_util::{empty_as_none, null_as_empty, null_as_zero, year_of};
use crate::{EntityKey, MediaKind};

/// Cast and crew of a movie or TV show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credits {
    pub id: u64,
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub character: String,
    #[serde(default)]
    pub profile_path: Option<String>,
    #[serde(default)]
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewMember {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub department: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub job: String,
    #[serde(default)]
    pub profile_path: Option<String>,
}

/// Combined movie and TV credits of one person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonCredits {
    pub id: u64,
    #[serde(default)]
    pub cast: Vec<PersonCastCredit>,
    #[serde(default)]
    pub crew: Vec<PersonCrewCredit>,
}

/// Title side of a person credit. Movies carry `title`/`release_date`,
/// TV shows carry `name`/`first_air_date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditedTitle {
    pub id: u64,
    pub media_type: MediaKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub first_air_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub vote_average: f64,
}

impl CreditedTitle {
    pub fn key(&self) -> EntityKey {
        EntityKey::new(self.media_type, self.id)
    }

    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or_default()
    }

    pub fn release_year(&self) -> Option<i32> {
        year_of(
            self.release_date
                .as_deref()
                .or(self.first_air_date.as_deref()),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonCastCredit {
    #[serde(flatten)]
    pub title: CreditedTitle,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub character: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonCrewCredit {
    #[serde(flatten)]
    pub title: CreditedTitle,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub department: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub job: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_credits() {
        let json = r#"{
            "id": 27205,
            "cast": [{"id": 6193, "name": "Leonardo DiCaprio", "character": "Cobb", "order": 0}],
            "crew": [{"id": 525, "name": "Christopher Nolan", "department": "Directing", "job": "Director"}]
        }"#;

        let credits: Credits = serde_json::from_str(json).unwrap();
        assert_eq!(credits.cast[0].character, "Cobb");
        assert_eq!(credits.crew[0].job, "Director");
    }

    #[test]
    fn test_person_credits_mix_movies_and_tv() {
        let json = r#"{
            "id": 525,
            "cast": [{"id": 1, "media_type": "tv", "name": "Cameo Show", "character": "Himself"}],
            "crew": [
                {"id": 27205, "media_type": "movie", "title": "Inception", "release_date": "2010-07-15",
                 "department": "Directing", "job": "Director", "credit_id": "abc"},
                {"id": 155, "media_type": "movie", "title": "The Dark Knight", "release_date": "",
                 "department": "Writing", "job": "Screenplay"}
            ]
        }"#;

        let credits: PersonCredits = serde_json::from_str(json).unwrap();
        assert_eq!(credits.cast[0].title.display_title(), "Cameo Show");
        assert_eq!(credits.cast[0].title.key(), EntityKey::tv(1));
        assert_eq!(credits.crew[0].title.release_year(), Some(2010));
        assert_eq!(credits.crew[1].title.release_date, None);
        assert_eq!(credits.crew[1].job, "Screenplay");
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Kind of entity shown on a poster.
///
/// The string forms match the remote API's path segments and `media_type` tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Movie,
    Tv,
    Person,
}

impl MediaKind {
    pub const ALL: [MediaKind; 3] = [MediaKind::Movie, MediaKind::Tv, MediaKind::Person];

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Tv => "tv",
            MediaKind::Person => "person",
        }
    }

    /// Movies and TV shows are titles; people are not.
    pub fn is_title(&self) -> bool {
        matches!(self, MediaKind::Movie | MediaKind::Tv)
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "movie" | "movies" => Ok(MediaKind::Movie),
            "tv" | "show" | "shows" => Ok(MediaKind::Tv),
            "person" | "people" => Ok(MediaKind::Person),
            _ => Err(Error::InvalidKind(s.to_string())),
        }
    }
}

/// Identity of an entity: the (kind, id) pair.
///
/// Ids are only unique within a kind, so a bare id never identifies anything
/// on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityKey {
    pub kind: MediaKind,
    pub id: u64,
}

impl EntityKey {
    pub fn new(kind: MediaKind, id: u64) -> Self {
        Self { kind, id }
    }

    pub fn movie(id: u64) -> Self {
        Self::new(MediaKind::Movie, id)
    }

    pub fn tv(id: u64) -> Self {
        Self::new(MediaKind::Tv, id)
    }

    pub fn person(id: u64) -> Self {
        Self::new(MediaKind::Person, id)
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

impl FromStr for EntityKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, id) = s
            .split_once(':')
            .ok_or_else(|| Error::InvalidKey(s.to_string()))?;
        let kind = kind.parse::<MediaKind>()?;
        let id = id
            .trim()
            .parse::<u64>()
            .map_err(|_| Error::InvalidKey(s.to_string()))?;
        Ok(Self { kind, id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parsing_is_case_insensitive() {
        assert_eq!("Movie".parse::<MediaKind>().unwrap(), MediaKind::Movie);
        assert_eq!("TV".parse::<MediaKind>().unwrap(), MediaKind::Tv);
        assert_eq!("people".parse::<MediaKind>().unwrap(), MediaKind::Person);
        assert!("book".parse::<MediaKind>().is_err());
    }

    #[test]
    fn test_key_display_and_parse() {
        let key = EntityKey::movie(27205);
        assert_eq!(key.to_string(), "movie:27205");
        assert_eq!("movie:27205".parse::<EntityKey>().unwrap(), key);
        assert!("movie".parse::<EntityKey>().is_err());
        assert!("movie:abc".parse::<EntityKey>().is_err());
    }

    #[test]
    fn test_same_id_different_kind_is_different_key() {
        assert_ne!(EntityKey::movie(1), EntityKey::tv(1));
    }
}

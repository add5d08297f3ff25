use chrono::{DateTime, Utc};
use reelguess_types::{EntityKey, Genre, GuessState, MediaKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Persisted guess state for one entity, created on first interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShadowRecord {
    pub key: EntityKey,
    /// Last known display name, kept so favorites can be listed offline.
    pub title: Option<String>,
    pub poster_path: Option<String>,
    pub state: GuessState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A cached genre list together with the time it was fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedGenres {
    pub kind: MediaKind,
    pub genres: Vec<Genre>,
    pub fetched_at: DateTime<Utc>,
}

impl CachedGenres {
    /// Staleness is advisory: callers decide whether to refetch.
    pub fn is_stale(&self, max_age: chrono::Duration, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.fetched_at) > max_age
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindStats {
    pub tracked: u64,
    pub revealed: u64,
    pub guessed: u64,
    pub hints: u64,
    pub favorites: u64,
    pub watchlist: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    pub by_kind: BTreeMap<MediaKind, KindStats>,
}

impl StoreStats {
    pub fn total(&self) -> KindStats {
        self.by_kind
            .values()
            .fold(KindStats::default(), |acc, s| KindStats {
                tracked: acc.tracked + s.tracked,
                revealed: acc.revealed + s.revealed,
                guessed: acc.guessed + s.guessed,
                hints: acc.hints + s.hints,
                favorites: acc.favorites + s.favorites,
                watchlist: acc.watchlist + s.watchlist,
            })
    }
}

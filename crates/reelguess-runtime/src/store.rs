use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use reelguess_index::{CachedGenres, Database, ShadowRecord, StoreStats};
use reelguess_types::{EntityKey, Genre, GuessState, MediaKind};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::Path;

use crate::Result;

/// Guess store shared by every presenter.
///
/// Each call holds the lock for one short synchronous store operation; no
/// lock is held across an await.
pub struct Store {
    db: Mutex<Database>,
}

impl Store {
    pub fn new(db: Database) -> Self {
        Self { db: Mutex::new(db) }
    }

    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::new(Database::open(path)?))
    }

    pub fn in_memory() -> Result<Self> {
        Ok(Self::new(Database::open_in_memory()?))
    }

    pub fn fetch_or_create(
        &self,
        key: EntityKey,
        title: Option<&str>,
        poster_path: Option<&str>,
    ) -> Result<ShadowRecord> {
        Ok(self.db.lock().fetch_or_create(key, title, poster_path)?)
    }

    pub fn get(&self, key: EntityKey) -> Result<Option<ShadowRecord>> {
        Ok(self.db.lock().get(key)?)
    }

    /// Guess state for `key` without creating a record. Untouched entities
    /// read as the default (hidden) state.
    pub fn state(&self, key: EntityKey) -> Result<GuessState> {
        Ok(self.get(key)?.map(|record| record.state).unwrap_or_default())
    }

    /// States for every key that has a record; keys without one are absent.
    pub fn states(&self, keys: &[EntityKey]) -> Result<HashMap<EntityKey, GuessState>> {
        let db = self.db.lock();
        let mut states = HashMap::with_capacity(keys.len());
        for key in keys {
            if let Some(record) = db.get(*key)? {
                states.insert(*key, record.state);
            }
        }
        Ok(states)
    }

    pub fn mark_revealed(&self, key: EntityKey) -> Result<ShadowRecord> {
        Ok(self.db.lock().mark_revealed(key)?)
    }

    pub fn mark_hint_shown(&self, key: EntityKey) -> Result<ShadowRecord> {
        Ok(self.db.lock().mark_hint_shown(key)?)
    }

    pub fn mark_correctly_guessed(&self, key: EntityKey) -> Result<ShadowRecord> {
        Ok(self.db.lock().mark_correctly_guessed(key)?)
    }

    pub fn toggle_favorite(&self, key: EntityKey) -> Result<bool> {
        Ok(self.db.lock().toggle_favorite(key)?)
    }

    pub fn toggle_watchlist(&self, key: EntityKey) -> Result<bool> {
        Ok(self.db.lock().toggle_watchlist(key)?)
    }

    pub fn touch_viewed(&self, key: EntityKey, at: DateTime<Utc>) -> Result<()> {
        Ok(self.db.lock().touch_viewed(key, at)?)
    }

    pub fn list_favorites(&self, kind: Option<MediaKind>) -> Result<Vec<ShadowRecord>> {
        Ok(self.db.lock().list_favorites(kind)?)
    }

    pub fn list_watchlist(&self, kind: Option<MediaKind>) -> Result<Vec<ShadowRecord>> {
        Ok(self.db.lock().list_watchlist(kind)?)
    }

    pub fn recently_viewed(&self, limit: usize) -> Result<Vec<ShadowRecord>> {
        Ok(self.db.lock().recently_viewed(limit)?)
    }

    pub fn record_count(&self) -> Result<usize> {
        Ok(self.db.lock().record_count()?)
    }

    pub fn stats(&self) -> Result<StoreStats> {
        Ok(self.db.lock().stats()?)
    }

    pub fn store_genres(&self, kind: MediaKind, genres: &[Genre], at: DateTime<Utc>) -> Result<()> {
        Ok(self.db.lock().store_genres(kind, genres, at)?)
    }

    pub fn genres(&self, kind: MediaKind) -> Result<Option<CachedGenres>> {
        Ok(self.db.lock().genres(kind)?)
    }

    pub fn set_entity_genres(&self, key: EntityKey, genre_ids: &[u64]) -> Result<()> {
        Ok(self.db.lock().set_entity_genres(key, genre_ids)?)
    }

    pub fn entity_genres(&self, key: EntityKey) -> Result<Vec<Genre>> {
        Ok(self.db.lock().entity_genres(key)?)
    }

    pub fn entity_genre_ids(&self, key: EntityKey) -> Result<Vec<u64>> {
        Ok(self.db.lock().entity_genre_ids(key)?)
    }

    pub fn store_credits<T: Serialize>(
        &self,
        key: EntityKey,
        payload: &T,
        at: DateTime<Utc>,
    ) -> Result<()> {
        Ok(self.db.lock().store_credits(key, payload, at)?)
    }

    pub fn credits<T: DeserializeOwned>(&self, key: EntityKey) -> Result<Option<T>> {
        Ok(self.db.lock().credits(key)?)
    }

    pub fn set_flag(&self, name: &str, value: bool) -> Result<()> {
        Ok(self.db.lock().set_flag(name, value)?)
    }

    pub fn flag(&self, name: &str) -> Result<bool> {
        Ok(self.db.lock().flag(name)?)
    }

    pub fn vacuum(&self) -> Result<()> {
        Ok(self.db.lock().vacuum()?)
    }
}

use chrono::{DateTime, Utc};
use reelguess_types::{EntityKey, Genre, MediaKind};
use rusqlite::Connection;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::queries::shadow::{MonotonicFlag, ToggleFlag};
use crate::queries::{credits, flags, genres, shadow};
use crate::records::{CachedGenres, ShadowRecord, StoreStats};
use crate::{Error, Result, schema};

/// Synchronous guess-state store.
///
/// Changes are visible to the next read on the same connection. Callers that
/// share a store across threads wrap it in a mutex.
pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path)?;
        let db = Self { conn };
        schema::init_schema(&db.conn)?;
        tracing::debug!(path = %db_path.display(), "opened guess store");
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        schema::init_schema(&db.conn)?;
        Ok(db)
    }

    pub fn schema_version(&self) -> Result<i32> {
        schema::schema_version(&self.conn)
    }

    // --- Shadow records ---

    /// Return the shadow record for `key`, creating it on first use.
    ///
    /// `title` and `poster_path` refresh the stored snapshot when given; guess
    /// flags are never modified here.
    pub fn fetch_or_create(
        &self,
        key: EntityKey,
        title: Option<&str>,
        poster_path: Option<&str>,
    ) -> Result<ShadowRecord> {
        shadow::ensure(&self.conn, key, title, poster_path, Utc::now())?;
        self.require(key)
    }

    pub fn get(&self, key: EntityKey) -> Result<Option<ShadowRecord>> {
        shadow::get(&self.conn, key)
    }

    pub fn mark_revealed(&self, key: EntityKey) -> Result<ShadowRecord> {
        self.set_monotonic(key, MonotonicFlag::Revealed)
    }

    pub fn mark_hint_shown(&self, key: EntityKey) -> Result<ShadowRecord> {
        self.set_monotonic(key, MonotonicFlag::HintShown)
    }

    pub fn mark_correctly_guessed(&self, key: EntityKey) -> Result<ShadowRecord> {
        self.set_monotonic(key, MonotonicFlag::CorrectlyGuessed)
    }

    /// Flip the favorite flag and return the new value.
    pub fn toggle_favorite(&self, key: EntityKey) -> Result<bool> {
        self.toggle(key, ToggleFlag::Favorite)
    }

    /// Flip the watchlist flag and return the new value.
    pub fn toggle_watchlist(&self, key: EntityKey) -> Result<bool> {
        self.toggle(key, ToggleFlag::Watchlist)
    }

    pub fn touch_viewed(&self, key: EntityKey, at: DateTime<Utc>) -> Result<()> {
        shadow::ensure(&self.conn, key, None, None, at)?;
        shadow::touch_viewed(&self.conn, key, at)
    }

    pub fn list_favorites(&self, kind: Option<MediaKind>) -> Result<Vec<ShadowRecord>> {
        shadow::list_flagged(&self.conn, ToggleFlag::Favorite, kind)
    }

    pub fn list_watchlist(&self, kind: Option<MediaKind>) -> Result<Vec<ShadowRecord>> {
        shadow::list_flagged(&self.conn, ToggleFlag::Watchlist, kind)
    }

    pub fn recently_viewed(&self, limit: usize) -> Result<Vec<ShadowRecord>> {
        shadow::recently_viewed(&self.conn, limit)
    }

    pub fn record_count(&self) -> Result<usize> {
        shadow::count(&self.conn)
    }

    pub fn stats(&self) -> Result<StoreStats> {
        shadow::stats(&self.conn)
    }

    fn set_monotonic(&self, key: EntityKey, flag: MonotonicFlag) -> Result<ShadowRecord> {
        let now = Utc::now();
        shadow::ensure(&self.conn, key, None, None, now)?;
        shadow::set_true(&self.conn, key, flag, now)?;
        self.require(key)
    }

    fn toggle(&self, key: EntityKey, flag: ToggleFlag) -> Result<bool> {
        let now = Utc::now();
        shadow::ensure(&self.conn, key, None, None, now)?;
        shadow::toggle(&self.conn, key, flag, now)
    }

    fn require(&self, key: EntityKey) -> Result<ShadowRecord> {
        shadow::get(&self.conn, key)?
            .ok_or_else(|| Error::Query(format!("Shadow record {} missing after write", key)))
    }

    // --- Genres ---

    /// Replace the global genre list for `kind`.
    pub fn store_genres(
        &self,
        kind: MediaKind,
        list: &[Genre],
        fetched_at: DateTime<Utc>,
    ) -> Result<()> {
        genres::replace(&self.conn, kind, list, fetched_at)
    }

    pub fn genres(&self, kind: MediaKind) -> Result<Option<CachedGenres>> {
        genres::get(&self.conn, kind)
    }

    pub fn set_entity_genres(&self, key: EntityKey, genre_ids: &[u64]) -> Result<()> {
        genres::set_for_entity(&self.conn, key, genre_ids)
    }

    pub fn entity_genres(&self, key: EntityKey) -> Result<Vec<Genre>> {
        genres::for_entity(&self.conn, key)
    }

    pub fn entity_genre_ids(&self, key: EntityKey) -> Result<Vec<u64>> {
        genres::entity_genre_ids(&self.conn, key)
    }

    // --- Credits ---

    pub fn store_credits<T: Serialize>(
        &self,
        key: EntityKey,
        payload: &T,
        fetched_at: DateTime<Utc>,
    ) -> Result<()> {
        credits::upsert(&self.conn, key, payload, fetched_at)
    }

    pub fn credits<T: DeserializeOwned>(&self, key: EntityKey) -> Result<Option<T>> {
        Ok(credits::get(&self.conn, key)?.map(|(payload, _)| payload))
    }

    // --- Flags ---

    pub fn set_flag(&self, name: &str, value: bool) -> Result<()> {
        flags::set(&self.conn, name, value)
    }

    pub fn flag(&self, name: &str) -> Result<bool> {
        flags::get(&self.conn, name)
    }

    pub fn vacuum(&self) -> Result<()> {
        self.conn.execute("VACUUM", [])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use reelguess_types::{Credits, GuessStatus};

    #[test]
    fn test_schema_initialization() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.schema_version().unwrap(), schema::SCHEMA_VERSION);
        assert_eq!(db.record_count().unwrap(), 0);
    }

    #[test]
    fn test_fetch_or_create_is_idempotent() {
        let db = Database::open_in_memory().unwrap();
        let key = EntityKey::movie(27205);

        let first = db
            .fetch_or_create(key, Some("Inception"), Some("/p.jpg"))
            .unwrap();
        let second = db.fetch_or_create(key, None, None).unwrap();

        assert_eq!(db.record_count().unwrap(), 1);
        assert_eq!(second.title.as_deref(), Some("Inception"));
        assert_eq!(second.poster_path.as_deref(), Some("/p.jpg"));
        assert_eq!(first.created_at, second.created_at);
        assert_eq!(second.state.status(), GuessStatus::Hidden);
    }

    #[test]
    fn test_mark_revealed_twice() {
        let db = Database::open_in_memory().unwrap();
        let key = EntityKey::tv(1399);

        db.mark_revealed(key).unwrap();
        let record = db.mark_revealed(key).unwrap();

        assert!(record.state.revealed);
        assert!(!record.state.correctly_guessed);
        assert_eq!(db.record_count().unwrap(), 1);
    }

    #[test]
    fn test_flags_are_independent() {
        let db = Database::open_in_memory().unwrap();
        let key = EntityKey::person(525);

        let record = db.mark_correctly_guessed(key).unwrap();
        assert!(record.state.correctly_guessed);
        assert!(!record.state.revealed);
        assert!(!record.state.hint_shown);

        let record = db.mark_hint_shown(key).unwrap();
        assert!(record.state.hint_shown);
        assert!(record.state.correctly_guessed);
    }

    #[test]
    fn test_same_id_different_kinds_are_separate_records() {
        let db = Database::open_in_memory().unwrap();
        db.mark_revealed(EntityKey::movie(1)).unwrap();
        let tv = db.fetch_or_create(EntityKey::tv(1), None, None).unwrap();

        assert!(!tv.state.revealed);
        assert_eq!(db.record_count().unwrap(), 2);
    }

    #[test]
    fn test_toggle_favorite_and_watchlist() {
        let db = Database::open_in_memory().unwrap();
        let key = EntityKey::movie(155);

        assert!(db.toggle_favorite(key).unwrap());
        assert!(db.toggle_watchlist(key).unwrap());
        assert!(!db.toggle_favorite(key).unwrap());

        assert!(db.list_favorites(None).unwrap().is_empty());
        let watchlist = db.list_watchlist(Some(MediaKind::Movie)).unwrap();
        assert_eq!(watchlist.len(), 1);
        assert_eq!(watchlist[0].key, key);
        assert!(db.list_watchlist(Some(MediaKind::Tv)).unwrap().is_empty());
    }

    #[test]
    fn test_recently_viewed_order() {
        let db = Database::open_in_memory().unwrap();
        let early = Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2025, 1, 2, 10, 0, 0).unwrap();

        db.touch_viewed(EntityKey::movie(1), early).unwrap();
        db.touch_viewed(EntityKey::movie(2), late).unwrap();
        db.fetch_or_create(EntityKey::movie(3), None, None).unwrap();

        let recent = db.recently_viewed(10).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].key, EntityKey::movie(2));
        assert_eq!(recent[0].state.last_viewed_at, Some(late));
    }

    #[test]
    fn test_stats_per_kind() {
        let db = Database::open_in_memory().unwrap();
        db.mark_revealed(EntityKey::movie(1)).unwrap();
        db.mark_correctly_guessed(EntityKey::movie(2)).unwrap();
        db.toggle_favorite(EntityKey::tv(3)).unwrap();

        let stats = db.stats().unwrap();
        let movies = stats.by_kind[&MediaKind::Movie];
        assert_eq!(movies.tracked, 2);
        assert_eq!(movies.revealed, 1);
        assert_eq!(movies.guessed, 1);
        assert_eq!(stats.by_kind[&MediaKind::Tv].favorites, 1);
        assert_eq!(stats.total().tracked, 3);
    }

    #[test]
    fn test_genre_list_replace_and_staleness() {
        let db = Database::open_in_memory().unwrap();
        let fetched = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();

        assert!(db.genres(MediaKind::Movie).unwrap().is_none());

        db.store_genres(
            MediaKind::Movie,
            &[Genre::new(28, "Action"), Genre::new(35, "Comedy")],
            fetched,
        )
        .unwrap();
        db.store_genres(MediaKind::Movie, &[Genre::new(18, "Drama")], fetched)
            .unwrap();

        let cached = db.genres(MediaKind::Movie).unwrap().unwrap();
        assert_eq!(cached.genres, vec![Genre::new(18, "Drama")]);
        assert_eq!(cached.fetched_at, fetched);
        assert!(!cached.is_stale(chrono::Duration::days(7), fetched + chrono::Duration::days(6)));
        assert!(cached.is_stale(chrono::Duration::days(7), fetched + chrono::Duration::days(8)));
        assert!(db.genres(MediaKind::Tv).unwrap().is_none());
    }

    #[test]
    fn test_entity_genres_join() {
        let db = Database::open_in_memory().unwrap();
        let key = EntityKey::tv(1399);
        db.store_genres(
            MediaKind::Tv,
            &[Genre::new(18, "Drama"), Genre::new(10765, "Sci-Fi & Fantasy")],
            Utc::now(),
        )
        .unwrap();
        // 28 is a movie genre id; it has no tv row and is skipped
        db.set_entity_genres(key, &[10765, 18, 28]).unwrap();

        let names: Vec<String> = db
            .entity_genres(key)
            .unwrap()
            .into_iter()
            .map(|g| g.name)
            .collect();
        assert_eq!(names, vec!["Drama", "Sci-Fi & Fantasy"]);
        assert_eq!(db.entity_genre_ids(key).unwrap(), vec![18, 28, 10765]);

        db.set_entity_genres(key, &[18]).unwrap();
        assert_eq!(db.entity_genre_ids(key).unwrap(), vec![18]);
    }

    #[test]
    fn test_credits_cache() {
        let db = Database::open_in_memory().unwrap();
        let key = EntityKey::movie(27205);
        let credits = Credits {
            id: 27205,
            cast: vec![],
            crew: vec![],
        };

        assert!(db.credits::<Credits>(key).unwrap().is_none());
        db.store_credits(key, &credits, Utc::now()).unwrap();
        assert_eq!(db.credits::<Credits>(key).unwrap(), Some(credits));
    }

    #[test]
    fn test_flags_default_false() {
        let db = Database::open_in_memory().unwrap();
        assert!(!db.flag("upgraded").unwrap());
        db.set_flag("upgraded", true).unwrap();
        assert!(db.flag("upgraded").unwrap());
        db.set_flag("upgraded", false).unwrap();
        assert!(!db.flag("upgraded").unwrap());
    }
}

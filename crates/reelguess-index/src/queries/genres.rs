use chrono::{DateTime, Utc};
use reelguess_types::{EntityKey, Genre, MediaKind};
use rusqlite::{Connection, params};

use super::{required_ts, sql_id, ts};
use crate::Result;
use crate::records::CachedGenres;

/// Replace the cached list for `kind` in one transaction.
pub fn replace(
    conn: &Connection,
    kind: MediaKind,
    genres: &[Genre],
    fetched_at: DateTime<Utc>,
) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute("DELETE FROM genres WHERE kind = ?1", [kind.as_str()])?;
    {
        let mut stmt = tx.prepare(
            r#"
            INSERT INTO genres (kind, id, name, fetched_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(kind, id) DO UPDATE SET name = ?3, fetched_at = ?4
            "#,
        )?;
        let fetched_at = ts(fetched_at);
        for genre in genres {
            stmt.execute(params![kind.as_str(), sql_id(genre.id), &genre.name, &fetched_at])?;
        }
    }
    tx.commit()?;
    Ok(())
}

pub fn get(conn: &Connection, kind: MediaKind) -> Result<Option<CachedGenres>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT id, name, fetched_at
        FROM genres
        WHERE kind = ?1
        ORDER BY name
        "#,
    )?;

    let rows = stmt
        .query_map([kind.as_str()], |row| {
            let id: i64 = row.get(0)?;
            let fetched_at: String = row.get(2)?;
            Ok((Genre::new(id as u64, row.get::<_, String>(1)?), fetched_at))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    if rows.is_empty() {
        return Ok(None);
    }

    // Lists are replaced wholesale, so the oldest row dates the list.
    let fetched_at = rows
        .iter()
        .map(|(_, at)| required_ts(at))
        .min()
        .unwrap_or_default();

    Ok(Some(CachedGenres {
        kind,
        genres: rows.into_iter().map(|(genre, _)| genre).collect(),
        fetched_at,
    }))
}

pub fn set_for_entity(conn: &Connection, key: EntityKey, genre_ids: &[u64]) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute(
        "DELETE FROM entity_genres WHERE kind = ?1 AND entity_id = ?2",
        params![key.kind.as_str(), sql_id(key.id)],
    )?;
    {
        let mut stmt = tx.prepare(
            r#"
            INSERT OR IGNORE INTO entity_genres (kind, entity_id, genre_id)
            VALUES (?1, ?2, ?3)
            "#,
        )?;
        for genre_id in genre_ids {
            stmt.execute(params![key.kind.as_str(), sql_id(key.id), sql_id(*genre_id)])?;
        }
    }
    tx.commit()?;
    Ok(())
}

/// Genres of one entity, resolved against the cached global list.
/// Ids missing from the list are skipped.
pub fn for_entity(conn: &Connection, key: EntityKey) -> Result<Vec<Genre>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT g.id, g.name
        FROM entity_genres eg
        JOIN genres g ON g.kind = eg.kind AND g.id = eg.genre_id
        WHERE eg.kind = ?1 AND eg.entity_id = ?2
        ORDER BY g.name
        "#,
    )?;

    let genres = stmt
        .query_map(params![key.kind.as_str(), sql_id(key.id)], |row| {
            let id: i64 = row.get(0)?;
            Ok(Genre::new(id as u64, row.get::<_, String>(1)?))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(genres)
}

pub fn entity_genre_ids(conn: &Connection, key: EntityKey) -> Result<Vec<u64>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT genre_id FROM entity_genres
        WHERE kind = ?1 AND entity_id = ?2
        ORDER BY genre_id
        "#,
    )?;
    let ids = stmt
        .query_map(params![key.kind.as_str(), sql_id(key.id)], |row| {
            row.get::<_, i64>(0)
        })?
        .map(|id| id.map(|id| id as u64))
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(ids)
}

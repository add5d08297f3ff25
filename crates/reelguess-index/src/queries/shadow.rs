use chrono::{DateTime, Utc};
use reelguess_types::{EntityKey, GuessState, MediaKind};
use rusqlite::{Connection, OptionalExtension, Row, params};

use super::{kind_column, parse_ts, required_ts, sql_id, ts};
use crate::Result;
use crate::records::{KindStats, ShadowRecord, StoreStats};

const SELECT_COLUMNS: &str = r#"
    SELECT kind, id, title, poster_path, revealed, correctly_guessed, hint_shown,
           favorite, watchlist, last_viewed_at, created_at, updated_at
    FROM shadow_records
"#;

/// Boolean columns that only ever move from 0 to 1.
#[derive(Debug, Clone, Copy)]
pub enum MonotonicFlag {
    Revealed,
    CorrectlyGuessed,
    HintShown,
}

impl MonotonicFlag {
    fn column(&self) -> &'static str {
        match self {
            MonotonicFlag::Revealed => "revealed",
            MonotonicFlag::CorrectlyGuessed => "correctly_guessed",
            MonotonicFlag::HintShown => "hint_shown",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum ToggleFlag {
    Favorite,
    Watchlist,
}

impl ToggleFlag {
    fn column(&self) -> &'static str {
        match self {
            ToggleFlag::Favorite => "favorite",
            ToggleFlag::Watchlist => "watchlist",
        }
    }
}

fn map_row(row: &Row<'_>) -> rusqlite::Result<ShadowRecord> {
    let kind: String = row.get(0)?;
    let id: i64 = row.get(1)?;
    let last_viewed: Option<String> = row.get(9)?;
    let created_at: String = row.get(10)?;
    let updated_at: String = row.get(11)?;

    Ok(ShadowRecord {
        key: EntityKey::new(kind_column(0, &kind)?, id as u64),
        title: row.get(2)?,
        poster_path: row.get(3)?,
        state: GuessState {
            revealed: row.get(4)?,
            correctly_guessed: row.get(5)?,
            hint_shown: row.get(6)?,
            favorite: row.get(7)?,
            watchlist: row.get(8)?,
            last_viewed_at: last_viewed.as_deref().and_then(parse_ts),
        },
        created_at: required_ts(&created_at),
        updated_at: required_ts(&updated_at),
    })
}

/// Insert the record if missing; refresh title/poster when given. Never touches flags.
pub fn ensure(
    conn: &Connection,
    key: EntityKey,
    title: Option<&str>,
    poster_path: Option<&str>,
    now: DateTime<Utc>,
) -> Result<()> {
    conn.execute(
        r#"
        INSERT INTO shadow_records (kind, id, title, poster_path, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?5)
        ON CONFLICT(kind, id) DO UPDATE SET
            title = COALESCE(?3, title),
            poster_path = COALESCE(?4, poster_path)
        "#,
        params![key.kind.as_str(), sql_id(key.id), title, poster_path, ts(now)],
    )?;
    Ok(())
}

pub fn get(conn: &Connection, key: EntityKey) -> Result<Option<ShadowRecord>> {
    let sql = format!("{} WHERE kind = ?1 AND id = ?2", SELECT_COLUMNS);
    let record = conn
        .query_row(&sql, params![key.kind.as_str(), sql_id(key.id)], map_row)
        .optional()?;
    Ok(record)
}

pub fn set_true(
    conn: &Connection,
    key: EntityKey,
    flag: MonotonicFlag,
    now: DateTime<Utc>,
) -> Result<()> {
    let sql = format!(
        "UPDATE shadow_records SET {col} = 1, updated_at = ?3 WHERE kind = ?1 AND id = ?2",
        col = flag.column()
    );
    conn.execute(&sql, params![key.kind.as_str(), sql_id(key.id), ts(now)])?;
    Ok(())
}

pub fn toggle(
    conn: &Connection,
    key: EntityKey,
    flag: ToggleFlag,
    now: DateTime<Utc>,
) -> Result<bool> {
    let sql = format!(
        r#"
        UPDATE shadow_records SET {col} = NOT {col}, updated_at = ?3
        WHERE kind = ?1 AND id = ?2
        RETURNING {col}
        "#,
        col = flag.column()
    );
    let value: bool = conn.query_row(
        &sql,
        params![key.kind.as_str(), sql_id(key.id), ts(now)],
        |row| row.get(0),
    )?;
    Ok(value)
}

pub fn touch_viewed(conn: &Connection, key: EntityKey, at: DateTime<Utc>) -> Result<()> {
    conn.execute(
        r#"
        UPDATE shadow_records SET last_viewed_at = ?3, updated_at = ?3
        WHERE kind = ?1 AND id = ?2
        "#,
        params![key.kind.as_str(), sql_id(key.id), ts(at)],
    )?;
    Ok(())
}

pub fn list_flagged(
    conn: &Connection,
    flag: ToggleFlag,
    kind: Option<MediaKind>,
) -> Result<Vec<ShadowRecord>> {
    let mut sql = format!("{} WHERE {} = 1", SELECT_COLUMNS, flag.column());
    if kind.is_some() {
        sql.push_str(" AND kind = ?1");
    }
    sql.push_str(" ORDER BY updated_at DESC, kind, id");

    let mut stmt = conn.prepare(&sql)?;
    let records = match kind {
        Some(kind) => stmt
            .query_map([kind.as_str()], map_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?,
        None => stmt
            .query_map([], map_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?,
    };
    Ok(records)
}

pub fn recently_viewed(conn: &Connection, limit: usize) -> Result<Vec<ShadowRecord>> {
    let sql = format!(
        "{} WHERE last_viewed_at IS NOT NULL ORDER BY last_viewed_at DESC LIMIT ?1",
        SELECT_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let records = stmt
        .query_map([limit as i64], map_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(records)
}

pub fn count(conn: &Connection) -> Result<usize> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM shadow_records", [], |row| row.get(0))?;
    Ok(count as usize)
}

pub fn stats(conn: &Connection) -> Result<StoreStats> {
    let mut stmt = conn.prepare(
        r#"
        SELECT kind,
               COUNT(*),
               SUM(revealed),
               SUM(correctly_guessed),
               SUM(hint_shown),
               SUM(favorite),
               SUM(watchlist)
        FROM shadow_records
        GROUP BY kind
        "#,
    )?;

    let rows = stmt
        .query_map([], |row| {
            let kind: String = row.get(0)?;
            let stats = KindStats {
                tracked: row.get::<_, i64>(1)? as u64,
                revealed: row.get::<_, i64>(2)? as u64,
                guessed: row.get::<_, i64>(3)? as u64,
                hints: row.get::<_, i64>(4)? as u64,
                favorites: row.get::<_, i64>(5)? as u64,
                watchlist: row.get::<_, i64>(6)? as u64,
            };
            Ok((kind_column(0, &kind)?, stats))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(StoreStats {
        by_kind: rows.into_iter().collect(),
    })
}

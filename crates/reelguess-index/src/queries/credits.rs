use chrono::{DateTime, Utc};
use reelguess_types::EntityKey;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{required_ts, sql_id, ts};
use crate::Result;

pub fn upsert<T: Serialize>(
    conn: &Connection,
    key: EntityKey,
    credits: &T,
    fetched_at: DateTime<Utc>,
) -> Result<()> {
    let payload = serde_json::to_string(credits)?;
    conn.execute(
        r#"
        INSERT INTO credits (kind, id, payload, fetched_at)
        VALUES (?1, ?2, ?3, ?4)
        ON CONFLICT(kind, id) DO UPDATE SET payload = ?3, fetched_at = ?4
        "#,
        params![key.kind.as_str(), sql_id(key.id), payload, ts(fetched_at)],
    )?;
    Ok(())
}

pub fn get<T: DeserializeOwned>(
    conn: &Connection,
    key: EntityKey,
) -> Result<Option<(T, DateTime<Utc>)>> {
    let row: Option<(String, String)> = conn
        .query_row(
            "SELECT payload, fetched_at FROM credits WHERE kind = ?1 AND id = ?2",
            params![key.kind.as_str(), sql_id(key.id)],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?;

    match row {
        Some((payload, fetched_at)) => {
            let credits = serde_json::from_str(&payload)?;
            Ok(Some((credits, required_ts(&fetched_at))))
        }
        None => Ok(None),
    }
}

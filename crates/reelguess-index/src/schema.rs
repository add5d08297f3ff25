use rusqlite::Connection;

use crate::{Error, Result};

// Schema version (increment when adding a migration)
pub const SCHEMA_VERSION: i32 = 2;

// NOTE: Migrations are forward-only and applied one version at a time.
// Shadow records hold the player's progress, so a migration must never drop
// them. Cached genres and credits can always be refetched.
const MIGRATIONS: &[(i32, &str)] = &[
    (
        1,
        r#"
        CREATE TABLE IF NOT EXISTS shadow_records (
            kind TEXT NOT NULL,
            id INTEGER NOT NULL,
            revealed BOOLEAN NOT NULL DEFAULT 0,
            correctly_guessed BOOLEAN NOT NULL DEFAULT 0,
            hint_shown BOOLEAN NOT NULL DEFAULT 0,
            favorite BOOLEAN NOT NULL DEFAULT 0,
            last_viewed_at TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            PRIMARY KEY (kind, id)
        );

        CREATE TABLE IF NOT EXISTS genres (
            kind TEXT NOT NULL,
            id INTEGER NOT NULL,
            name TEXT NOT NULL,
            fetched_at TEXT NOT NULL,
            PRIMARY KEY (kind, id)
        );

        CREATE TABLE IF NOT EXISTS credits (
            kind TEXT NOT NULL,
            id INTEGER NOT NULL,
            payload TEXT NOT NULL,
            fetched_at TEXT NOT NULL,
            PRIMARY KEY (kind, id)
        );
        "#,
    ),
    (
        2,
        r#"
        ALTER TABLE shadow_records ADD COLUMN watchlist BOOLEAN NOT NULL DEFAULT 0;
        ALTER TABLE shadow_records ADD COLUMN title TEXT;
        ALTER TABLE shadow_records ADD COLUMN poster_path TEXT;

        CREATE TABLE IF NOT EXISTS entity_genres (
            kind TEXT NOT NULL,
            entity_id INTEGER NOT NULL,
            genre_id INTEGER NOT NULL,
            PRIMARY KEY (kind, entity_id, genre_id)
        );

        CREATE TABLE IF NOT EXISTS app_flags (
            name TEXT PRIMARY KEY,
            value BOOLEAN NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_shadow_viewed ON shadow_records(last_viewed_at DESC);
        "#,
    ),
];

pub fn init_schema(conn: &Connection) -> Result<()> {
    let current_version = schema_version(conn)?;

    if current_version > SCHEMA_VERSION {
        return Err(Error::Query(format!(
            "Store was written by a newer version (schema {}, supported {})",
            current_version, SCHEMA_VERSION
        )));
    }

    for (version, sql) in MIGRATIONS.iter().filter(|(v, _)| *v > current_version) {
        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(sql)?;
        tx.execute(&format!("PRAGMA user_version = {}", version), [])?;
        tx.commit()?;
        tracing::info!(version, "applied store migration");
    }

    Ok(())
}

pub fn schema_version(conn: &Connection) -> Result<i32> {
    let version: i32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_sequential() {
        for (i, (version, _)) in MIGRATIONS.iter().enumerate() {
            assert_eq!(*version, i as i32 + 1);
        }
        assert_eq!(MIGRATIONS.last().map(|(v, _)| *v), Some(SCHEMA_VERSION));
    }

    #[test]
    fn test_init_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        init_schema(&conn).unwrap();
        assert_eq!(schema_version(&conn).unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn test_rejects_newer_schema() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute("PRAGMA user_version = 99", []).unwrap();
        let err = init_schema(&conn).unwrap_err();
        assert!(err.to_string().contains("newer version"));
    }
}

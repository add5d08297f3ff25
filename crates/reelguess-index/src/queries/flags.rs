use rusqlite::{Connection, OptionalExtension, params};

use crate::Result;

pub fn set(conn: &Connection, name: &str, value: bool) -> Result<()> {
    conn.execute(
        r#"
        INSERT INTO app_flags (name, value) VALUES (?1, ?2)
        ON CONFLICT(name) DO UPDATE SET value = ?2
        "#,
        params![name, value],
    )?;
    Ok(())
}

/// Unset flags read as false.
pub fn get(conn: &Connection, name: &str) -> Result<bool> {
    let value: Option<bool> = conn
        .query_row(
            "SELECT value FROM app_flags WHERE name = ?1",
            [name],
            |row| row.get(0),
        )
        .optional()?;
    Ok(value.unwrap_or(false))
}

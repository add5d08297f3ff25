use std::fmt;

/// Result type for guess-store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failures of the local guess store.
#[derive(Debug)]
pub enum Error {
    /// SQLite rejected a statement
    Database(rusqlite::Error),

    /// The store directory could not be created
    Io(std::io::Error),

    /// Cached credits could not be encoded or decoded
    Serialization(serde_json::Error),

    /// Store invariant broken (unknown kind, future schema, missing record)
    Query(String),
}

impl Error {
    /// SQLite reports a table or column this build expects but the file lacks.
    /// Happens when a store written by an older build skipped a migration.
    pub fn is_schema_mismatch(&self) -> bool {
        match self {
            Error::Database(err) => {
                let msg = err.to_string();
                msg.contains("no such column") || msg.contains("no such table")
            }
            _ => false,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Database(err) if self.is_schema_mismatch() => write!(
                f,
                "Guess store is missing part of its schema ({}). Reopen it with this version to apply migrations.",
                err
            ),
            Error::Database(err) => write!(f, "Guess store error: {}", err),
            Error::Io(err) => write!(f, "Cannot create guess store: {}", err),
            Error::Serialization(err) => write!(f, "Cached credits are unreadable: {}", err),
            Error::Query(msg) => write!(f, "Guess store error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Database(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Serialization(err) => Some(err),
            Error::Query(_) => None,
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_missing_junction_table_reads_as_schema_mismatch() {
        let conn = Connection::open_in_memory().unwrap();
        let err: Error = conn
            .execute("DELETE FROM entity_genres WHERE kind = 'tv'", [])
            .unwrap_err()
            .into();

        assert!(err.is_schema_mismatch());
        let msg = err.to_string();
        assert!(msg.contains("entity_genres"));
        assert!(msg.contains("apply migrations"));
    }

    #[test]
    fn test_duplicate_record_is_a_plain_store_error() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE app_flags (name TEXT PRIMARY KEY, value INTEGER)")
            .unwrap();
        conn.execute("INSERT INTO app_flags VALUES ('upgraded', 1)", [])
            .unwrap();
        let err: Error = conn
            .execute("INSERT INTO app_flags VALUES ('upgraded', 0)", [])
            .unwrap_err()
            .into();

        assert!(!err.is_schema_mismatch());
        assert!(err.to_string().starts_with("Guess store error:"));
    }

    #[test]
    fn test_corrupt_credits_payload() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{\"cast\": [")
            .unwrap_err()
            .into();
        assert!(err.to_string().starts_with("Cached credits are unreadable"));
    }
}

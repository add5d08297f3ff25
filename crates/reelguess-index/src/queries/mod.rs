pub mod credits;
pub mod flags;
pub mod genres;
pub mod shadow;

use chrono::{DateTime, Utc};
use reelguess_types::MediaKind;
use rusqlite::types::Type;

pub(crate) fn ts(value: DateTime<Utc>) -> String {
    value.to_rfc3339()
}

pub(crate) fn parse_ts(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Required timestamp column; falls back to the epoch when the text is malformed.
pub(crate) fn required_ts(value: &str) -> DateTime<Utc> {
    parse_ts(value).unwrap_or_default()
}

pub(crate) fn kind_column(idx: usize, value: &str) -> rusqlite::Result<MediaKind> {
    value
        .parse::<MediaKind>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

// SQLite integers are signed; entity ids never come close to i64::MAX.
pub(crate) fn sql_id(id: u64) -> i64 {
    id as i64
}

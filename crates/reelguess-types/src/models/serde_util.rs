use serde::{Deserialize, Deserializer};

/// The API sends `""` for unknown dates; treat that the same as `null`.
pub(crate) fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// `null` numbers decode to zero.
pub(crate) fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}

/// `null` strings decode to empty.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Leading four digits of an ISO date (`2010-07-15` -> 2010).
pub(crate) fn year_of(date: Option<&str>) -> Option<i32> {
    let date = date?;
    date.get(..4)?.parse().ok()
}

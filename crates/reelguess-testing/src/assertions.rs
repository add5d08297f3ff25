//! Custom assertions over the CLI's JSON output.

use anyhow::{Context, Result};
use predicates::prelude::*;
use serde_json::Value;

/// Assert that a grid or list output holds `expected` items.
pub fn assert_item_count(json: &Value, expected: usize) -> Result<()> {
    let items = json["items"]
        .as_array()
        .context("Expected 'items' array in JSON")?;

    if items.len() != expected {
        anyhow::bail!("Expected {} items, got {}", expected, items.len());
    }

    Ok(())
}

/// Assert that the item for `key` (e.g. `movie:27205`) has the given guess status.
pub fn assert_item_status(json: &Value, key: &str, status: &str) -> Result<()> {
    let items = json["items"]
        .as_array()
        .context("Expected 'items' array in JSON")?;

    let item = items
        .iter()
        .find(|item| item["key"].as_str() == Some(key))
        .with_context(|| format!("No item with key {}", key))?;

    let actual = item["status"]
        .as_str()
        .with_context(|| format!("Item {} missing status", key))?;
    if actual != status {
        anyhow::bail!("Item {} has status {} but expected {}", key, actual, status);
    }

    Ok(())
}

/// Predicate for the CLI's failure line on stderr.
pub fn error_message(message: &str) -> impl Predicate<str> {
    predicate::str::contains("Error: ").and(predicate::str::contains(message.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_assert_item_count() {
        let json = json!({"items": [{"key": "movie:1"}, {"key": "tv:1"}]});

        assert!(assert_item_count(&json, 2).is_ok());
        assert!(assert_item_count(&json, 1).is_err());
    }

    #[test]
    fn test_assert_item_status() {
        let json = json!({"items": [{"key": "movie:1", "status": "revealed"}]});

        assert!(assert_item_status(&json, "movie:1", "revealed").is_ok());
        assert!(assert_item_status(&json, "movie:1", "hidden").is_err());
        assert!(assert_item_status(&json, "movie:2", "hidden").is_err());
    }

    #[test]
    fn test_error_message_predicate() {
        let predicate = error_message("upgrade");
        assert!(predicate.eval("Error: Hints need the upgrade"));
        assert!(!predicate.eval("upgrade"));
    }
}

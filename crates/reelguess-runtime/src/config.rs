use crate::{Error, Result};
use reelguess_client::ApiConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.toml";
pub const DATABASE_FILE: &str = "reelguess.db";

pub const PATH_ENV: &str = "REELGUESS_PATH";
pub const API_KEY_ENV: &str = "REELGUESS_API_KEY";

/// Resolve the data directory path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. REELGUESS_PATH environment variable (with tilde expansion)
/// 3. XDG data directory (recommended default)
/// 4. ~/.reelguess (fallback for systems without XDG)
pub fn resolve_data_dir(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var(PATH_ENV)
        && !env_path.trim().is_empty()
    {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join("reelguess"));
    }

    if let Some(home) = dirs::home_dir() {
        return Ok(home.join(".reelguess"));
    }

    Err(Error::Config(
        "Could not determine data directory: no HOME directory or XDG data directory found"
            .to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cached genre lists older than this are refetched
    pub genre_ttl_hours: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            genre_ttl_hours: 24 * 7,
        }
    }
}

impl CacheConfig {
    pub fn genre_ttl(&self) -> chrono::Duration {
        let hours = i64::try_from(self.genre_ttl_hours).unwrap_or(i64::MAX / 3600);
        chrono::Duration::hours(hours)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load `config.toml` from a data directory and apply environment
    /// overrides.
    pub fn load_for(data_dir: &Path) -> Result<Self> {
        let mut config = Self::load_from(&data_dir.join(CONFIG_FILE))?;
        config.apply_env();
        Ok(config)
    }

    /// `REELGUESS_API_KEY` wins over the key in the file.
    pub fn apply_env(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV)
            && !key.trim().is_empty()
        {
            self.api.api_key = key.trim().to_string();
        }
    }

    /// Copy safe to print: the api key is masked.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.api.api_key.is_empty() {
            copy.api.api_key = "***".to_string();
        }
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.cache.genre_ttl_hours, 168);
        assert_eq!(config.api.language, "en-US");
    }

    #[test]
    fn test_config_save_and_load() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nested").join(CONFIG_FILE);

        let mut config = Config::default();
        config.api.api_key = "abc123".to_string();
        config.cache.genre_ttl_hours = 12;

        config.save_to(&config_path)?;
        assert!(config_path.exists());

        let loaded = Config::load_from(&config_path)?;
        assert_eq!(loaded, config);

        Ok(())
    }

    #[test]
    fn test_partial_file_keeps_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join(CONFIG_FILE);
        std::fs::write(&config_path, "[api]\napi_key = \"k\"\n")?;

        let loaded = Config::load_from(&config_path)?;
        assert_eq!(loaded.api.api_key, "k");
        assert_eq!(loaded.api.image_width, "w500");
        assert_eq!(loaded.cache, CacheConfig::default());

        Ok(())
    }

    #[test]
    fn test_malformed_file_is_config_error() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join(CONFIG_FILE);
        std::fs::write(&config_path, "[api\n")?;

        assert!(matches!(
            Config::load_from(&config_path),
            Err(Error::Config(_))
        ));
        Ok(())
    }

    #[test]
    fn test_load_nonexistent_returns_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config = Config::load_from(&temp_dir.path().join("nonexistent.toml"))?;
        assert_eq!(config, Config::default());
        Ok(())
    }

    #[test]
    fn test_explicit_path_wins() -> Result<()> {
        let path = resolve_data_dir(Some("/tmp/reelguess-explicit"))?;
        assert_eq!(path, PathBuf::from("/tmp/reelguess-explicit"));
        Ok(())
    }

    #[test]
    fn test_redacted_masks_key() {
        let mut config = Config::default();
        config.api.api_key = "secret".to_string();
        assert_eq!(config.redacted().api.api_key, "***");
        assert_eq!(Config::default().redacted().api.api_key, "");
    }
}

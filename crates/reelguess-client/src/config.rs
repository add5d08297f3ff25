use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";
pub const DEFAULT_IMAGE_WIDTH: &str = "w500";

/// Connection settings for the metadata API and its image CDN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub image_base_url: String,
    /// Width variant segment of image URLs (`w185`, `w500`, `original`, ...)
    pub image_width: String,
    pub api_key: String,
    pub language: String,
    pub connect_timeout_secs: u64,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            image_width: DEFAULT_IMAGE_WIDTH.to_string(),
            api_key: String::new(),
            language: "en-US".to_string(),
            connect_timeout_secs: 15,
            timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Full CDN URL of a poster path (`/abc.jpg` -> `{base}/{width}/abc.jpg`).
    pub fn image_url(&self, path: &str) -> String {
        format!(
            "{}/{}{}",
            self.image_base_url.trim_end_matches('/'),
            self.image_width,
            normalize_image_path(path)
        )
    }
}

/// Poster paths always start with a slash; add one when it is missing.
pub fn normalize_image_path(path: &str) -> String {
    let path = path.trim();
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

//! Poster download, decode and memoization.

use image::{DynamicImage, GenericImageView};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use crate::api::{ApiClient, interpret};
use crate::cancel::CancelScope;
use crate::coalesce::Coalescer;
use crate::config::{ApiConfig, normalize_image_path};
use crate::error::{ApiError, ImageError};
use crate::request::HttpRequest;
use crate::transport::HttpTransport;

/// A decoded poster together with its encoded bytes.
#[derive(Debug, Clone)]
pub struct Poster {
    pub path: String,
    pub width: u32,
    pub height: u32,
    pub bytes: Arc<Vec<u8>>,
    pub image: DynamicImage,
}

impl Poster {
    fn decode(path: String, bytes: Arc<Vec<u8>>) -> Result<Self, ImageError> {
        let image =
            image::load_from_memory(&bytes).map_err(|e| ImageError::Decode(e.to_string()))?;
        let (width, height) = image.dimensions();
        Ok(Self {
            path,
            width,
            height,
            bytes,
            image,
        })
    }
}

type PosterCache = Arc<Mutex<HashMap<String, Arc<Poster>>>>;

/// Loads posters from the image CDN and keeps every decoded poster for the
/// life of the loader. Only successes are kept.
pub struct ImageLoader {
    config: ApiConfig,
    transport: Arc<dyn HttpTransport>,
    cache: PosterCache,
    inflight: Coalescer<String, Result<Arc<Poster>, ImageError>>,
}

impl ImageLoader {
    pub fn new(config: ApiConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            config,
            transport,
            cache: Arc::new(Mutex::new(HashMap::new())),
            inflight: Coalescer::new(),
        }
    }

    /// Loader sharing the client's transport and CDN settings.
    pub fn for_client(client: &ApiClient) -> Self {
        Self::new(client.config().clone(), client.transport())
    }

    pub fn url_for(&self, path: &str) -> String {
        self.config.image_url(path)
    }

    pub async fn load(&self, path: &str, scope: &CancelScope) -> Result<Arc<Poster>, ImageError> {
        let path = normalize_image_path(path);
        if let Some(poster) = self.cached(&path) {
            return Ok(poster);
        }
        if scope.is_cancelled() {
            return Err(ApiError::Cancelled.into());
        }

        let url = self.config.image_url(&path);
        let transport = Arc::clone(&self.transport);
        let cache = Arc::clone(&self.cache);
        let fetch = self.inflight.run(path.clone(), move || {
            // A fetch for this path may have finished between the cache check
            // above and taking the coalescer lock.
            let hit = cache.lock().get(&path).cloned();
            async move {
                match hit {
                    Some(poster) => Ok(poster),
                    None => fetch_poster(transport, url, path, cache).await,
                }
            }
        });

        scope
            .run(fetch)
            .await
            .unwrap_or_else(|| Err(ApiError::Cancelled.into()))
    }

    pub fn cached(&self, path: &str) -> Option<Arc<Poster>> {
        self.cache.lock().get(&normalize_image_path(path)).cloned()
    }

    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.lock().is_empty()
    }

    pub fn clear(&self) {
        self.cache.lock().clear();
    }
}

async fn fetch_poster(
    transport: Arc<dyn HttpTransport>,
    url: String,
    path: String,
    cache: PosterCache,
) -> Result<Arc<Poster>, ImageError> {
    tracing::debug!(%url, "fetching poster");
    let response = transport
        .send(HttpRequest::get(url))
        .await
        .map_err(|e| ApiError::Connection(e.0))?;
    let bytes = interpret(response)?;
    let poster = Arc::new(Poster::decode(path.clone(), bytes)?);
    cache.lock().insert(path, Arc::clone(&poster));
    Ok(poster)
}

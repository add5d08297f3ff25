use chrono::{DateTime, Utc};
use reelguess_client::{ApiError, CancelScope};
use reelguess_types::{Genre, MediaKind};

use crate::Result;
use crate::services::Services;

/// Genre picker: cache-through read of the global genre list per kind.
pub struct GenrePresenter {
    services: Services,
    scope: CancelScope,
}

impl GenrePresenter {
    pub fn new(services: Services) -> Self {
        Self {
            services,
            scope: CancelScope::new(),
        }
    }

    pub fn scope(&self) -> &CancelScope {
        &self.scope
    }

    pub async fn load(&self, kind: MediaKind) -> Result<Vec<Genre>> {
        self.load_at(kind, Utc::now()).await
    }

    pub async fn load_at(&self, kind: MediaKind, now: DateTime<Utc>) -> Result<Vec<Genre>> {
        cached_genres(&self.services, kind, &self.scope, now).await
    }

    /// Cancel any in-flight fetch.
    pub fn close(&self) {
        self.scope.cancel();
    }
}

impl Drop for GenrePresenter {
    fn drop(&mut self) {
        self.scope.cancel();
    }
}

/// Serve the cached list while it is younger than the configured TTL;
/// otherwise refetch and replace it. When the refetch fails, a stale list is
/// still better than nothing.
pub(crate) async fn cached_genres(
    services: &Services,
    kind: MediaKind,
    scope: &CancelScope,
    now: DateTime<Utc>,
) -> Result<Vec<Genre>> {
    if !kind.is_title() {
        return Ok(Vec::new());
    }

    let cached = services.store.genres(kind)?;
    let ttl = services.config.cache.genre_ttl();
    if let Some(cached) = &cached
        && !cached.is_stale(ttl, now)
    {
        tracing::debug!(%kind, count = cached.genres.len(), "genre cache hit");
        return Ok(cached.genres.clone());
    }

    match services.api.genres(kind, scope).await {
        Ok(genres) => {
            services.store.store_genres(kind, &genres, now)?;
            Ok(genres)
        }
        Err(ApiError::Cancelled) => Err(ApiError::Cancelled.into()),
        Err(err) => match cached {
            Some(stale) => {
                tracing::warn!(%kind, error = %err, "genre refresh failed, serving stale list");
                Ok(stale.genres)
            }
            None => Err(err.into()),
        },
    }
}

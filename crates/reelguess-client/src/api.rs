//! Typed access to the metadata API.

use reelguess_types::{
    Credits, Entity, EntityKey, Genre, GenreList, MediaKind, Movie, Page, Person, PersonCredits,
    TvShow,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::cancel::CancelScope;
use crate::coalesce::Coalescer;
use crate::config::ApiConfig;
use crate::endpoint::Endpoint;
use crate::error::{ApiError, TransportError};
use crate::request::{HttpRequest, HttpResponse};
use crate::status::{StatusClass, classify_status};
use crate::transport::{HttpTransport, ReqwestTransport};

pub(crate) type FetchResult = Result<Arc<Vec<u8>>, ApiError>;

/// Client for the metadata API.
///
/// Cheap to share behind an `Arc`; all state is the coalescing table.
pub struct ApiClient {
    config: ApiConfig,
    transport: Arc<dyn HttpTransport>,
    inflight: Coalescer<String, FetchResult>,
}

impl ApiClient {
    pub fn new(config: ApiConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            config,
            transport,
            inflight: Coalescer::new(),
        }
    }

    /// Client over the production reqwest transport.
    pub fn with_reqwest(config: ApiConfig) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::from_config(&config)?;
        Ok(Self::new(config, Arc::new(transport)))
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn transport(&self) -> Arc<dyn HttpTransport> {
        Arc::clone(&self.transport)
    }

    /// Build the GET for an endpoint, including the api key and language.
    pub fn request_for(&self, endpoint: &Endpoint) -> HttpRequest {
        let mut params = endpoint.parameters();
        params.insert("api_key", self.config.api_key.as_str());
        params.insert("language", self.config.language.as_str());

        let url = format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint.path()
        );
        HttpRequest::get(url).with_query(params.to_query())
    }

    /// Fetch and decode one endpoint.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        scope: &CancelScope,
    ) -> Result<T, ApiError> {
        let request = self.request_for(endpoint);
        let bytes = self.fetch_bytes(request, scope).await?;
        decode(endpoint, &bytes)
    }

    /// Send a request through the coalescing table. Identical URLs in flight
    /// at the same time share one transport call.
    pub async fn fetch_bytes(
        &self,
        request: HttpRequest,
        scope: &CancelScope,
    ) -> Result<Arc<Vec<u8>>, ApiError> {
        if scope.is_cancelled() {
            return Err(ApiError::Cancelled);
        }

        let key = request.full_url();
        let transport = Arc::clone(&self.transport);
        let shared = self.inflight.run(key, move || send(transport, request));
        scope.run(shared).await.unwrap_or(Err(ApiError::Cancelled))
    }

    /// Official genres for a title kind. People have no genres.
    pub async fn genres(&self, kind: MediaKind, scope: &CancelScope) -> Result<Vec<Genre>, ApiError> {
        if !kind.is_title() {
            return Ok(Vec::new());
        }
        let list: GenreList = self.fetch(&Endpoint::GenreList(kind), scope).await?;
        Ok(list.genres)
    }

    /// One page of popular entities of `kind`. A negative `genre_id` means all
    /// genres; people ignore the genre and come from the popular-people list.
    pub async fn discover(
        &self,
        kind: MediaKind,
        genre_id: i64,
        page: u32,
        scope: &CancelScope,
    ) -> Result<Page<Entity>, ApiError> {
        let endpoint = Endpoint::discover(kind, genre_id, page);
        self.fetch_entities(kind, &endpoint, scope).await
    }

    pub async fn popular_people(
        &self,
        page: u32,
        scope: &CancelScope,
    ) -> Result<Page<Person>, ApiError> {
        self.fetch(&Endpoint::PopularPeople { page: page.max(1) }, scope)
            .await
    }

    pub async fn search(
        &self,
        kind: MediaKind,
        query: &str,
        page: u32,
        scope: &CancelScope,
    ) -> Result<Page<Entity>, ApiError> {
        let endpoint = Endpoint::search(kind, query.trim(), page);
        self.fetch_entities(kind, &endpoint, scope).await
    }

    pub async fn details(&self, key: EntityKey, scope: &CancelScope) -> Result<Entity, ApiError> {
        let endpoint = Endpoint::Details(key);
        let entity = match key.kind {
            MediaKind::Movie => Entity::Movie(self.fetch::<Movie>(&endpoint, scope).await?),
            MediaKind::Tv => Entity::Tv(self.fetch::<TvShow>(&endpoint, scope).await?),
            MediaKind::Person => Entity::Person(self.fetch::<Person>(&endpoint, scope).await?),
        };
        Ok(entity)
    }

    /// Cast and crew of a movie or TV show. People have combined credits
    /// instead, see [`ApiClient::person_credits`].
    pub async fn credits(&self, key: EntityKey, scope: &CancelScope) -> Result<Credits, ApiError> {
        if !key.kind.is_title() {
            return Err(ApiError::BadRequest);
        }
        self.fetch(&Endpoint::Credits(key), scope).await
    }

    pub async fn person_credits(
        &self,
        id: u64,
        scope: &CancelScope,
    ) -> Result<PersonCredits, ApiError> {
        self.fetch(&Endpoint::PersonCredits(id), scope).await
    }

    async fn fetch_entities(
        &self,
        kind: MediaKind,
        endpoint: &Endpoint,
        scope: &CancelScope,
    ) -> Result<Page<Entity>, ApiError> {
        let page = match kind {
            MediaKind::Movie => self
                .fetch::<Page<Movie>>(endpoint, scope)
                .await?
                .map(Entity::from),
            MediaKind::Tv => self
                .fetch::<Page<TvShow>>(endpoint, scope)
                .await?
                .map(Entity::from),
            MediaKind::Person => self
                .fetch::<Page<Person>>(endpoint, scope)
                .await?
                .map(Entity::from),
        };
        Ok(page)
    }
}

async fn send(transport: Arc<dyn HttpTransport>, request: HttpRequest) -> FetchResult {
    tracing::debug!(url = %request.redacted_url(), "sending request");
    match transport.send(request).await {
        Ok(response) => interpret(response),
        Err(err) => {
            tracing::debug!(error = %err, "transport failure");
            Err(ApiError::Connection(err.0))
        }
    }
}

/// Map a raw response onto the fixed outcome set.
pub(crate) fn interpret(response: HttpResponse) -> FetchResult {
    match classify_status(response.status) {
        StatusClass::Success if response.body.is_empty() => Err(ApiError::NoData),
        StatusClass::Success => Ok(Arc::new(response.body)),
        StatusClass::Authentication => Err(ApiError::Authentication),
        StatusClass::BadRequest => Err(ApiError::BadRequest),
        StatusClass::Outdated => Err(ApiError::Outdated),
        StatusClass::Failed => Err(ApiError::Failed(response.status)),
    }
}

fn decode<T: DeserializeOwned>(endpoint: &Endpoint, bytes: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(bytes).map_err(|err| {
        tracing::warn!(path = %endpoint.path(), error = %err, "failed to decode response");
        ApiError::Decode(err.to_string())
    })
}

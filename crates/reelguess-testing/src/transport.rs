//! In-process stand-in for the metadata API and the image CDN.

use async_trait::async_trait;
use parking_lot::Mutex;
use reelguess_client::{HttpRequest, HttpResponse, HttpTransport, TransportError};
use std::sync::Arc;
use std::time::Duration;

use crate::fixtures;

#[derive(Debug, Clone)]
struct Route {
    path: String,
    page: Option<u32>,
    response: Result<HttpResponse, TransportError>,
}

impl Route {
    fn matches(&self, request: &HttpRequest) -> bool {
        if !request.url.ends_with(&self.path) {
            return false;
        }
        match self.page {
            Some(page) => request.query_value("page") == Some(page.to_string().as_str()),
            None => true,
        }
    }
}

/// Fake [`HttpTransport`] that answers from a route table and records every
/// request it receives.
///
/// Routes match on the URL suffix (the API path, or the poster path for CDN
/// requests) and optionally on the `page` query value. Later routes win, so a
/// test can override one response of a preloaded table. Unmatched requests
/// fail like a refused connection.
///
/// # Example
/// ```no_run
/// use reelguess_testing::FakeTransport;
///
/// let transport = FakeTransport::tmdb().with_status("/movie/27205", 401);
/// assert_eq!(transport.request_count(), 0);
/// ```
#[derive(Default)]
pub struct FakeTransport {
    routes: Mutex<Vec<Route>>,
    requests: Mutex<Vec<HttpRequest>>,
    delay: Mutex<Option<Duration>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport preloaded with every payload in [`crate::fixtures`].
    pub fn tmdb() -> Self {
        Self::new()
            .with_json("/genre/movie/list", fixtures::MOVIE_GENRES)
            .with_json("/genre/tv/list", fixtures::TV_GENRES)
            .with_json("/discover/movie", fixtures::DISCOVER_MOVIES_PAGE_1)
            .with_page("/discover/movie", 2, fixtures::DISCOVER_MOVIES_PAGE_2)
            .with_json("/discover/tv", fixtures::DISCOVER_TV_PAGE_1)
            .with_json("/person/popular", fixtures::POPULAR_PEOPLE_PAGE_1)
            .with_json("/movie/27205", fixtures::INCEPTION_DETAILS)
            .with_json("/movie/27205/credits", fixtures::INCEPTION_CREDITS)
            .with_json("/person/525", fixtures::NOLAN_DETAILS)
            .with_json("/person/525/combined_credits", fixtures::NOLAN_CREDITS)
            .with_json("/search/movie", fixtures::SEARCH_DARK_KNIGHT)
            .with_bytes(fixtures::INCEPTION_POSTER, fixtures::poster_png(4, 6))
    }

    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn with_json(self, path: &str, body: &str) -> Self {
        self.respond(path, None, Ok(HttpResponse::new(200, body.as_bytes())));
        self
    }

    pub fn with_page(self, path: &str, page: u32, body: &str) -> Self {
        self.respond(path, Some(page), Ok(HttpResponse::new(200, body.as_bytes())));
        self
    }

    pub fn with_bytes(self, path: &str, body: Vec<u8>) -> Self {
        self.respond(path, None, Ok(HttpResponse::new(200, body)));
        self
    }

    pub fn with_status(self, path: &str, status: u16) -> Self {
        self.respond(path, None, Ok(HttpResponse::new(status, Vec::new())));
        self
    }

    pub fn with_failure(self, path: &str, message: &str) -> Self {
        self.respond(path, None, Err(TransportError(message.to_string())));
        self
    }

    /// Every request waits this long before answering, so concurrent callers
    /// overlap.
    pub fn with_delay(self, delay: Duration) -> Self {
        *self.delay.lock() = Some(delay);
        self
    }

    /// Replace or add a route on a transport that is already shared.
    pub fn respond(
        &self,
        path: &str,
        page: Option<u32>,
        response: Result<HttpResponse, TransportError>,
    ) {
        self.routes.lock().push(Route {
            path: path.to_string(),
            page,
            response,
        });
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Requests whose URL ends with `path`.
    pub fn count(&self, path: &str) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|request| request.url.ends_with(path))
            .count()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().last().cloned()
    }

    fn lookup(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.routes
            .lock()
            .iter()
            .rev()
            .find(|route| route.matches(request))
            .map(|route| route.response.clone())
            .unwrap_or_else(|| {
                Err(TransportError(format!(
                    "connection refused: no route for {}",
                    request.url
                )))
            })
    }
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().push(request.clone());
        let delay = *self.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.lookup(&request)
    }
}

//! Network side of reelguess: the metadata API client and the poster loader.
//!
//! Both sit on an injectable [`HttpTransport`] so tests and offline tools can
//! swap the real HTTP stack for a fake. Identical GETs that are in flight at
//! the same time share one network fetch, and every call runs inside a
//! [`CancelScope`] owned by the screen that asked for it.

pub mod api;
pub mod cancel;
pub mod coalesce;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod poster;
pub mod request;
pub mod status;
pub mod transport;

pub use api::ApiClient;
pub use cancel::CancelScope;
pub use config::ApiConfig;
pub use endpoint::Endpoint;
pub use error::{ApiError, ImageError, TransportError};
pub use poster::{ImageLoader, Poster};
pub use request::{HttpRequest, HttpResponse, Parameters, RequestBody};
pub use status::{StatusClass, classify_status};
pub use transport::{HttpTransport, ReqwestTransport};

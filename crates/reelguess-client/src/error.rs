//! Error types for the network layer.
//!
//! The remote outcomes form a small fixed set; every variant carries a
//! stable message that screens show as-is.

use thiserror::Error;

/// Failure of the underlying HTTP stack (DNS, TLS, connect, reset, ...).
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError(err.to_string())
    }
}

/// Errors returned by [`crate::ApiClient`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// 2xx with an empty body
    #[error("No data was returned")]
    NoData,

    /// Body could not be decoded into the expected model
    #[error("Could not decode the response")]
    Decode(String),

    /// 401-500
    #[error("Authentication error, check the API key")]
    Authentication,

    /// 501-599
    #[error("Bad request")]
    BadRequest,

    /// 600
    #[error("This version is outdated, please update")]
    Outdated,

    /// Any other status
    #[error("Network request failed (status {0})")]
    Failed(u16),

    /// Request never produced a response
    #[error("Please check your network connection")]
    Connection(String),

    /// The scope that issued the request was cancelled
    #[error("Request cancelled")]
    Cancelled,
}

impl ApiError {
    /// Detail for logs; the Display text is what users see.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Decode(detail) | ApiError::Connection(detail) => Some(detail),
            _ => None,
        }
    }
}

/// Errors returned by [`crate::ImageLoader`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Could not decode poster image: {0}")]
    Decode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_hide_details() {
        let err = ApiError::Decode("missing field `id` at line 1".to_string());
        assert_eq!(err.to_string(), "Could not decode the response");
        assert_eq!(err.detail(), Some("missing field `id` at line 1"));
        assert_eq!(ApiError::Failed(302).to_string(), "Network request failed (status 302)");
    }

    #[test]
    fn test_image_error_wraps_api_error() {
        let err = ImageError::from(ApiError::Authentication);
        assert_eq!(err.to_string(), ApiError::Authentication.to_string());
    }
}

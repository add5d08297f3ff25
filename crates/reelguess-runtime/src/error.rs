use reelguess_client::{ApiError, ImageError};
use reelguess_types::EntityKey;
use std::fmt;

/// Result type for reelguess-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by services and presenters.
#[derive(Debug)]
pub enum Error {
    /// Remote API failure (including cancellation)
    Api(ApiError),

    /// Poster download or decode failure
    Image(ImageError),

    /// Guess store failure
    Store(reelguess_index::Error),

    /// IO operation failed
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// The action needs the `upgraded` entitlement
    UpgradeRequired,

    /// Nothing known locally or remotely for this entity
    NotFound(EntityKey),
}

impl Error {
    /// Message handed to the view. Screens show it as a generic error with no
    /// differentiated recovery.
    pub fn display_message(&self) -> String {
        match self {
            Error::Api(err) => err.to_string(),
            Error::Image(err) => err.to_string(),
            Error::Store(_) => "Could not save your progress".to_string(),
            Error::Io(_) | Error::Config(_) => self.to_string(),
            Error::UpgradeRequired => "Hints are available after upgrading".to_string(),
            Error::NotFound(key) => format!("Nothing found for {}", key),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            Error::Api(ApiError::Cancelled) | Error::Image(ImageError::Api(ApiError::Cancelled))
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Api(err) => write!(f, "{}", err),
            Error::Image(err) => write!(f, "{}", err),
            Error::Store(err) => write!(f, "Store error: {}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::UpgradeRequired => write!(f, "Hints are available after upgrading"),
            Error::NotFound(key) => write!(f, "Nothing found for {}", key),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Api(err) => Some(err),
            Error::Image(err) => Some(err),
            Error::Store(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Config(_) | Error::UpgradeRequired | Error::NotFound(_) => None,
        }
    }
}

impl From<ApiError> for Error {
    fn from(err: ApiError) -> Self {
        Error::Api(err)
    }
}

impl From<ImageError> for Error {
    fn from(err: ImageError) -> Self {
        Error::Image(err)
    }
}

impl From<reelguess_index::Error> for Error {
    fn from(err: reelguess_index::Error) -> Self {
        Error::Store(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

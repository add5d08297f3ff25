use std::fmt;

/// Result type for reelguess-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the types layer
#[derive(Debug)]
pub enum Error {
    /// Unknown media kind string (expected movie, tv or person)
    InvalidKind(String),

    /// Malformed entity key (expected `<kind>:<id>`)
    InvalidKey(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidKind(kind) => {
                write!(f, "Unknown media kind '{}': expected movie, tv or person", kind)
            }
            Error::InvalidKey(key) => write!(f, "Invalid entity key '{}'", key),
        }
    }
}

impl std::error::Error for Error {}

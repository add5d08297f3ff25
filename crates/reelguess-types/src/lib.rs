pub mod domain;
pub mod error;
pub mod models;

pub use domain::*;
pub use error::{Error, Result};
pub use models::*;

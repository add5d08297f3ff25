pub mod credits;
pub mod entity;
pub mod genre;
pub mod page;
pub mod person;
pub mod title;
mod serde_util;

pub use credits::*;
pub use entity::*;
pub use genre::*;
pub use page::*;
pub use person::*;
pub use title::*;

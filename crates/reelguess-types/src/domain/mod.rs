pub mod guess;
pub mod key;

pub use guess::*;
pub use key::*;

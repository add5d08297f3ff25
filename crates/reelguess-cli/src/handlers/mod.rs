mod context;

pub mod browse;
pub mod config;
pub mod library;
pub mod poster;
pub mod screen;

pub use context::HandlerContext;

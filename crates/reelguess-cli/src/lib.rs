mod args;
mod commands;
mod handlers;
pub mod logging;
pub mod output;
pub mod types;

pub use args::{Cli, Commands, ConfigCommand, ListCommand};
pub use commands::run;

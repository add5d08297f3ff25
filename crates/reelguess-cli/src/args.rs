use crate::types::{KindArg, LogLevel, OutputFormat, Switch, TitleKindArg};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "reelguess")]
#[command(about = "Guess movies, shows and people from their posters", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Data directory (defaults to $REELGUESS_PATH, then the system data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    /// Overridden by RUST_LOG
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Genre list for a kind (cached locally)
    Genres { kind: KindArg },

    /// Popular titles, optionally in one genre
    Discover {
        kind: TitleKindArg,

        #[arg(long)]
        genre: Option<u64>,

        #[arg(long, default_value = "1")]
        page: u32,

        /// Leave out titles already revealed or guessed
        #[arg(long)]
        hide_revealed: bool,
    },

    /// Popular people
    People {
        #[arg(long, default_value = "1")]
        page: u32,

        #[arg(long)]
        hide_revealed: bool,
    },

    Search {
        kind: KindArg,

        query: String,

        #[arg(long, default_value = "1")]
        page: u32,
    },

    /// Detail screen for one title or person
    Show { kind: KindArg, id: u64 },

    /// Give up and show the answer
    Reveal { kind: KindArg, id: u64 },

    /// Initials hint (needs the upgrade)
    Hint { kind: KindArg, id: u64 },

    Guess {
        kind: KindArg,

        id: u64,

        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        text: Vec<String>,
    },

    /// Toggle the favorite flag
    Favorite { kind: KindArg, id: u64 },

    /// Toggle the watchlist flag
    Watchlist { kind: KindArg, id: u64 },

    List {
        #[command(subcommand)]
        command: ListCommand,
    },

    /// Cast and crew of a title, or a person's credits
    Credits { kind: KindArg, id: u64 },

    /// Download a poster image
    Poster {
        /// Image path as returned by the API, e.g. /oYuLEt3zVCKq57qu2F8dT7NIa6f.jpg
        path: String,

        #[arg(long)]
        out: PathBuf,
    },

    /// Turn the upgrade entitlement on or off
    Upgrade { state: Switch },

    /// Guess progress per kind
    Stats,

    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
pub enum ListCommand {
    Favorites {
        #[arg(long)]
        kind: Option<KindArg>,
    },

    Watchlist {
        #[arg(long)]
        kind: Option<KindArg>,
    },

    /// Recently opened titles and people
    Recent,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Write config.toml with defaults
    Init {
        #[arg(long)]
        api_key: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration (api key masked)
    Show,
}

use super::args::{Cli, Commands, ConfigCommand, ListCommand};
use super::handlers::{self, HandlerContext};
use crate::logging;
use crate::output::Printer;
use anyhow::Result;
use reelguess_runtime::{Category, Config, Services, resolve_data_dir};
use reelguess_types::{EntityKey, MediaKind};
use std::path::Path;

pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.log_level);

    let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;
    let printer = Printer::new(cli.format);

    // Config commands must work before there is a usable config.
    if let Commands::Config { command } = &cli.command {
        return match command {
            ConfigCommand::Init { api_key, force } => {
                handlers::config::init(&data_dir, api_key.clone(), *force, &printer)
            }
            ConfigCommand::Show => handlers::config::show(&data_dir, &printer),
        };
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(dispatch(cli.command, &data_dir, printer))
}

async fn dispatch(command: Commands, data_dir: &Path, printer: Printer) -> Result<()> {
    let config = Config::load_for(data_dir)?;
    if config.api.api_key.is_empty() && needs_network(&command) {
        tracing::warn!("no API key configured; set REELGUESS_API_KEY or run `reelguess config init --api-key`");
    }
    let services = Services::open(data_dir, config)?;
    let ctx = HandlerContext::new(services, printer);

    match command {
        Commands::Genres { kind } => handlers::browse::genres(&ctx, kind.into()).await,

        Commands::Discover {
            kind,
            genre,
            page,
            hide_revealed,
        } => {
            let category = Category::Discover {
                kind: kind.into(),
                genre,
            };
            handlers::browse::grid(&ctx, category, page, hide_revealed).await
        }

        Commands::People {
            page,
            hide_revealed,
        } => handlers::browse::grid(&ctx, Category::PopularPeople, page, hide_revealed).await,

        Commands::Search { kind, query, page } => {
            let category = Category::Search {
                kind: kind.into(),
                query,
            };
            handlers::browse::grid(&ctx, category, page, false).await
        }

        Commands::List { command } => {
            let category = match command {
                ListCommand::Favorites { kind } => Category::Favorites(kind.map(MediaKind::from)),
                ListCommand::Watchlist { kind } => Category::Watchlist(kind.map(MediaKind::from)),
                ListCommand::Recent => Category::RecentlyViewed,
            };
            handlers::browse::grid(&ctx, category, 1, false).await
        }

        Commands::Show { kind, id } => handlers::screen::show(&ctx, key(kind, id)).await,
        Commands::Reveal { kind, id } => handlers::screen::reveal(&ctx, key(kind, id)).await,
        Commands::Hint { kind, id } => handlers::screen::hint(&ctx, key(kind, id)).await,
        Commands::Guess { kind, id, text } => {
            handlers::screen::guess(&ctx, key(kind, id), &text.join(" ")).await
        }
        Commands::Credits { kind, id } => handlers::screen::credits(&ctx, key(kind, id)).await,

        Commands::Favorite { kind, id } => handlers::library::favorite(&ctx, key(kind, id)),
        Commands::Watchlist { kind, id } => handlers::library::watchlist(&ctx, key(kind, id)),
        Commands::Upgrade { state } => handlers::library::upgrade(&ctx, state.enabled()),
        Commands::Stats => handlers::library::stats(&ctx),

        Commands::Poster { path, out } => handlers::poster::handle(&ctx, &path, &out).await,

        Commands::Config { .. } => Ok(()),
    }
}

fn key(kind: crate::types::KindArg, id: u64) -> EntityKey {
    EntityKey::new(kind.into(), id)
}

fn needs_network(command: &Commands) -> bool {
    !matches!(
        command,
        Commands::List { .. }
            | Commands::Favorite { .. }
            | Commands::Watchlist { .. }
            | Commands::Upgrade { .. }
            | Commands::Stats
            | Commands::Config { .. }
    )
}

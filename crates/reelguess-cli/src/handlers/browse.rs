use super::HandlerContext;
use crate::output;
use anyhow::Result;
use reelguess_runtime::{Category, GridOptions};
use reelguess_types::MediaKind;

pub async fn genres(ctx: &HandlerContext, kind: MediaKind) -> Result<()> {
    let presenter = ctx.services.genre_presenter();
    let genres = presenter.load(kind).await?;
    ctx.printer
        .emit(&genres, |printer| output::genres(printer, &genres))
}

/// One page of a remote or local grid.
pub async fn grid(
    ctx: &HandlerContext,
    category: Category,
    page: u32,
    hide_revealed: bool,
) -> Result<()> {
    let presenter = ctx
        .services
        .grid_presenter()
        .with_options(GridOptions { hide_revealed });
    let grid = presenter.load(&category, page.max(1)).await?;
    let title = category.to_string();
    ctx.printer
        .emit(&grid, |printer| output::grid(printer, &title, &grid))
}

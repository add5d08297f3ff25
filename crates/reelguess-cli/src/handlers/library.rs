use super::HandlerContext;
use crate::output;
use anyhow::Result;
use reelguess_types::EntityKey;
use serde_json::json;

pub fn favorite(ctx: &HandlerContext, key: EntityKey) -> Result<()> {
    let favorite = ctx.services.store.toggle_favorite(key)?;
    let value = json!({ "key": key.to_string(), "favorite": favorite });
    ctx.printer.emit(&value, |_| {
        if favorite {
            println!("Added {} to favorites", key);
        } else {
            println!("Removed {} from favorites", key);
        }
    })
}

pub fn watchlist(ctx: &HandlerContext, key: EntityKey) -> Result<()> {
    let watchlist = ctx.services.store.toggle_watchlist(key)?;
    let value = json!({ "key": key.to_string(), "watchlist": watchlist });
    ctx.printer.emit(&value, |_| {
        if watchlist {
            println!("Added {} to the watchlist", key);
        } else {
            println!("Removed {} from the watchlist", key);
        }
    })
}

pub fn upgrade(ctx: &HandlerContext, enabled: bool) -> Result<()> {
    ctx.services.entitlements().set_upgraded(enabled)?;
    let value = json!({ "upgraded": enabled });
    ctx.printer.emit(&value, |_| {
        if enabled {
            println!("Upgrade enabled: hints are available");
        } else {
            println!("Upgrade disabled");
        }
    })
}

pub fn stats(ctx: &HandlerContext) -> Result<()> {
    let stats = ctx.services.store.stats()?;
    ctx.printer
        .emit(&stats, |printer| output::stats(printer, &stats))
}

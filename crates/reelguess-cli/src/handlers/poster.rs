use super::HandlerContext;
use anyhow::{Context, Result};
use reelguess_client::CancelScope;
use serde_json::json;
use std::path::Path;

/// Download a poster through the image loader and write the original bytes.
pub async fn handle(ctx: &HandlerContext, path: &str, out: &Path) -> Result<()> {
    let scope = CancelScope::new();
    let poster = ctx.services.images.load(path, &scope).await?;

    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(out, poster.bytes.as_slice())
        .with_context(|| format!("Failed to write {}", out.display()))?;

    let value = json!({
        "path": poster.path,
        "width": poster.width,
        "height": poster.height,
        "bytes": poster.bytes.len(),
        "out": out.display().to_string(),
    });
    ctx.printer.emit(&value, |_| {
        println!(
            "Saved {}x{} poster to {}",
            poster.width,
            poster.height,
            out.display()
        );
    })
}

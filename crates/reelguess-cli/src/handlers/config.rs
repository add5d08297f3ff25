use crate::output::Printer;
use anyhow::{Result, bail};
use reelguess_runtime::Config;
use reelguess_runtime::config::CONFIG_FILE;
use std::path::Path;

pub fn init(data_dir: &Path, api_key: Option<String>, force: bool, printer: &Printer) -> Result<()> {
    let path = data_dir.join(CONFIG_FILE);
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    let mut config = Config::default();
    if let Some(key) = api_key {
        config.api.api_key = key;
    }
    config.save_to(&path)?;

    let value = serde_json::json!({ "path": path.display().to_string() });
    printer.emit(&value, |_| println!("Wrote {}", path.display()))
}

pub fn show(data_dir: &Path, printer: &Printer) -> Result<()> {
    let config = Config::load_for(data_dir)?.redacted();
    if printer.is_json() {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        print!("{}", toml::to_string_pretty(&config)?);
    }
    Ok(())
}

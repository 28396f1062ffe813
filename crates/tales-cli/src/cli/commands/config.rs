//! `tales config` handlers.

use anyhow::{Context, Result};
use tales_core::config::{BASE_URL_ENV, Config, paths};

pub fn path() {
    println!("{}", paths::config_path().display());
}

/// Writes the commented template and points at the key most users change.
pub fn init() -> Result<()> {
    let target = paths::config_path();
    Config::init(&target).with_context(|| format!("init config at {}", target.display()))?;
    println!("Created config at {}", target.display());
    println!("Set base_url there (or {BASE_URL_ENV}) to point at your backend.");
    Ok(())
}

//! `smbget get <url> [--dest DIR]` – mirror a remote directory.

use anyhow::{Context, Result};
use smbget_core::{ResourceLocator, SmbGetter};
use std::path::Path;

pub fn run_get(getter: &SmbGetter, url: &str, dest: Option<&Path>) -> Result<()> {
    let locator = ResourceLocator::from_url(url)?;
    getter
        .get(&locator, dest)
        .with_context(|| format!("fetch directory {}", locator.path))?;
    println!(
        "Fetched {} into {}",
        locator.path,
        dest.unwrap_or_else(|| Path::new(".")).display()
    );
    Ok(())
}

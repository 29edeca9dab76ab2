//! `smbget auto <url> [--dest PATH]` – detect the mode, then fetch accordingly.

use anyhow::{Context, Result};
use smbget_core::{CancelToken, ResourceLocator, SmbGetter};
use std::path::Path;

pub fn run_auto(getter: &SmbGetter, url: &str, dest: Option<&Path>) -> Result<()> {
    let locator = ResourceLocator::from_url(url)?;
    let mode = getter
        .get_any(&locator, dest, &CancelToken::new())
        .with_context(|| format!("fetch {}", locator.path))?;
    println!("Fetched {} {}", mode, locator.path);
    Ok(())
}

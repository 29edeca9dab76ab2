//! `smbget mode <url>` – print whether the URL is a file or a directory.

use anyhow::Result;
use smbget_core::{ResourceLocator, SmbGetter};

pub fn run_mode(getter: &SmbGetter, url: &str) -> Result<()> {
    let locator = ResourceLocator::from_url(url)?;
    let mode = getter.mode(&locator)?;
    println!("{mode}");
    Ok(())
}

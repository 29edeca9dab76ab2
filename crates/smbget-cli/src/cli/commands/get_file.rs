//! `smbget get-file <url> [--dest FILE] [--checksum sha256:<hex>]` – fetch one file.

use anyhow::{Context, Result};
use smbget_core::checksum::Checksum;
use smbget_core::{CancelToken, ResourceLocator, SmbGetter};
use std::path::{Path, PathBuf};

pub fn run_get_file(
    getter: &SmbGetter,
    url: &str,
    dest: Option<&Path>,
    checksum: Option<&str>,
) -> Result<()> {
    let locator = ResourceLocator::from_url(url)?;
    // Parse before transferring anything so a typo fails fast.
    let checksum = checksum.map(str::parse::<Checksum>).transpose()?;

    getter
        .get_file(&locator, dest, &CancelToken::new())
        .with_context(|| format!("fetch file {}", locator.path))?;

    let written = fetched_path(&locator, dest);
    if let Some(checksum) = checksum {
        checksum.verify_or_remove(&written)?;
        tracing::debug!(path = %written.display(), "checksum verified");
    }
    println!("Fetched {} to {}", locator.path, written.display());
    Ok(())
}

/// Where the file lands: the destination, or its own name in the current directory.
fn fetched_path(locator: &ResourceLocator, dest: Option<&Path>) -> PathBuf {
    match dest {
        Some(d) => d.to_path_buf(),
        None => Path::new(&locator.path)
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetched_path_defaults_to_leaf() {
        let loc = ResourceLocator::new("nas.local", "/shared/docs/report.txt");
        assert_eq!(fetched_path(&loc, None), PathBuf::from("report.txt"));
        assert_eq!(
            fetched_path(&loc, Some(Path::new("/tmp/out/r.txt"))),
            PathBuf::from("/tmp/out/r.txt")
        );
    }
}

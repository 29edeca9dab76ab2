//! Mode detection and retrieval over an ordered list of strategies.
//!
//! Every public operation validates the locator, then runs the strategies in
//! order (local mount first, external client second by default) and returns
//! on the first success. When all of them fail, every cause is reported in
//! one [`AggregateError`], and a destination that did not exist beforehand
//! is removed.

use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;

use crate::cancel::CancelToken;
use crate::command::ShellRunner;
use crate::config::SmbgetConfig;
use crate::error::{AggregateError, SmbError};
use crate::locator::ResourceLocator;
use crate::mode::Mode;
use crate::strategy::{FetchStrategy, FsAccessor, LocalMountStrategy, SmbClientStrategy};

/// Fetches SMB share objects through the first strategy that works.
///
/// A cancelled attempt stops the fallback chain.
///
/// Holds no per-call state; concurrent calls for different destinations are safe.
pub struct SmbGetter {
    strategies: Vec<Box<dyn FetchStrategy>>,
}

impl SmbGetter {
    /// Local mount under `/`, then `smbclient` through `bash`.
    pub fn new() -> Self {
        Self::with_strategies(vec![
            Box::new(LocalMountStrategy::new()),
            Box::new(SmbClientStrategy::default()),
        ])
    }

    pub fn from_config(cfg: &SmbgetConfig) -> Self {
        let mut strategies: Vec<Box<dyn FetchStrategy>> = Vec::with_capacity(2);
        if cfg.mount.enabled {
            let mut accessor = FsAccessor::new();
            if let Some(bytes) = cfg.mount.copy_buffer_bytes {
                accessor = accessor.with_buffer_size(bytes);
            }
            strategies.push(Box::new(
                LocalMountStrategy::with_accessor(accessor).with_root(&cfg.mount.root),
            ));
        }
        let runner = Arc::new(ShellRunner::new(cfg.client.shell.clone()));
        strategies.push(Box::new(
            SmbClientStrategy::new(runner).with_program(cfg.client.program.clone()),
        ));
        Self::with_strategies(strategies)
    }

    /// Strategies are attempted in the given order.
    pub fn with_strategies(strategies: Vec<Box<dyn FetchStrategy>>) -> Self {
        Self { strategies }
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Determines whether the locator addresses a file or a directory.
    ///
    /// An error means the mode is [`Mode::Unknown`].
    pub fn mode(&self, locator: &ResourceLocator) -> Result<Mode, SmbError> {
        check_locator(locator)?;
        let mode = self.first_success("mode", |s| s.mode(locator))?;
        Ok(mode)
    }

    /// Recursively fetches the directory at `locator` into `dst`.
    pub fn get(&self, locator: &ResourceLocator, dst: Option<&Path>) -> Result<(), SmbError> {
        check_locator(locator)?;
        with_cleanup(dst, || self.first_success("get", |s| s.get_dir(locator, dst)))
    }

    /// Fetches the single file at `locator` to `dst`.
    ///
    /// `cancel` is honoured while copying from a local mount only.
    pub fn get_file(
        &self,
        locator: &ResourceLocator,
        dst: Option<&Path>,
        cancel: &CancelToken,
    ) -> Result<(), SmbError> {
        check_locator(locator)?;
        with_cleanup(dst, || {
            self.first_success("get_file", |s| s.get_file(locator, dst, cancel))
        })
    }

    /// Resolves the mode, then runs [`get`](Self::get) or [`get_file`](Self::get_file).
    pub fn get_any(
        &self,
        locator: &ResourceLocator,
        dst: Option<&Path>,
        cancel: &CancelToken,
    ) -> Result<Mode, SmbError> {
        let mode = self.mode(locator)?;
        match mode {
            Mode::Directory => self.get(locator, dst)?,
            Mode::File | Mode::Unknown => self.get_file(locator, dst, cancel)?,
        }
        Ok(mode)
    }

    fn first_success<T>(
        &self,
        op: &str,
        mut attempt: impl FnMut(&dyn FetchStrategy) -> Result<T, SmbError>,
    ) -> Result<T, AggregateError> {
        let mut errors = AggregateError::new();
        for strategy in &self.strategies {
            match attempt(strategy.as_ref()) {
                Ok(value) => {
                    tracing::info!(strategy = strategy.name(), op, "succeeded");
                    return Ok(value);
                }
                Err(e @ SmbError::Cancelled(_)) => {
                    tracing::info!(strategy = strategy.name(), op, "cancelled");
                    errors.push(strategy.name(), e);
                    break;
                }
                Err(e) => {
                    tracing::warn!(strategy = strategy.name(), op, "failed: {}", e);
                    errors.push(strategy.name(), e);
                }
            }
        }
        Err(errors)
    }
}

impl Default for SmbGetter {
    fn default() -> Self {
        Self::new()
    }
}

/// Shape checks shared by every operation; no strategy runs if these fail.
fn check_locator(locator: &ResourceLocator) -> Result<(), SmbError> {
    locator.validate()?;
    locator.split_share()?;
    Ok(())
}

/// Runs `fetch`; on failure removes `dst` unless it existed beforehand.
fn with_cleanup(
    dst: Option<&Path>,
    fetch: impl FnOnce() -> Result<(), AggregateError>,
) -> Result<(), SmbError> {
    // An unreadable destination counts as pre-existing so it is never removed.
    let existed = match dst {
        Some(d) => match fs::symlink_metadata(d) {
            Ok(_) => true,
            Err(e) => e.kind() != io::ErrorKind::NotFound,
        },
        None => true,
    };

    let result = fetch();
    if result.is_err() && !existed {
        if let Some(d) = dst {
            remove_destination(d);
        }
    }
    result.map_err(SmbError::from)
}

fn remove_destination(path: &Path) {
    let removed = match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(path),
        Ok(_) => fs::remove_file(path),
        Err(e) => Err(e),
    };
    match removed {
        Ok(()) => tracing::debug!(path = %path.display(), "removed partial destination"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(path = %path.display(), "could not remove destination: {}", e),
    }
}

//! Local-mount strategy: the share is already visible in the filesystem.

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use walkdir::WalkDir;

use super::FetchStrategy;
use crate::cancel::CancelToken;
use crate::error::SmbError;
use crate::locator::ResourceLocator;
use crate::mode::Mode;

pub const LOCAL_STRATEGY: &str = "local-mount";

const DEFAULT_BUF_SIZE: usize = 64 * 1024;

/// Filesystem operations the local-mount strategy relies on.
pub trait LocalAccessor: Send + Sync {
    /// Stats `path`; a missing path is an error.
    fn probe_mode(&self, path: &Path) -> Result<Mode, SmbError>;

    /// Mirrors the directory `src` into `dst`, creating `dst` if needed.
    fn copy_dir(&self, src: &Path, dst: &Path) -> Result<(), SmbError>;

    /// Copies the file `src` to `dst`. On failure or cancellation `dst` is left
    /// as it was: absent if it did not exist, unchanged if it did.
    fn copy_file(&self, src: &Path, dst: &Path, cancel: &CancelToken) -> Result<(), SmbError>;
}

/// [`LocalAccessor`] over `std::fs`.
#[derive(Debug, Clone)]
pub struct FsAccessor {
    buf_size: usize,
}

impl FsAccessor {
    pub fn new() -> Self {
        Self {
            buf_size: DEFAULT_BUF_SIZE,
        }
    }

    pub fn with_buffer_size(mut self, bytes: usize) -> Self {
        self.buf_size = bytes.max(1);
        self
    }

    fn copy_into(
        &self,
        src: &Path,
        dst: &Path,
        output: &mut fs::File,
        cancel: &CancelToken,
    ) -> Result<(), SmbError> {
        let mut input = fs::File::open(src).map_err(|e| SmbError::local(src, e))?;
        let mut buf = vec![0u8; self.buf_size];
        loop {
            cancel.check()?;
            let n = input.read(&mut buf).map_err(|e| SmbError::local(src, e))?;
            if n == 0 {
                break;
            }
            output
                .write_all(&buf[..n])
                .map_err(|e| SmbError::local(dst, e))?;
        }
        output.flush().map_err(|e| SmbError::local(dst, e))?;
        Ok(())
    }
}

/// Recreates the symlink `src` at `dst`, replacing a non-directory entry already there.
#[cfg(unix)]
fn copy_link(src: &Path, dst: &Path) -> Result<(), SmbError> {
    let link = fs::read_link(src).map_err(|e| SmbError::local(src, e))?;
    if let Ok(meta) = fs::symlink_metadata(dst) {
        if !meta.is_dir() {
            fs::remove_file(dst).map_err(|e| SmbError::local(dst, e))?;
        }
    }
    std::os::unix::fs::symlink(&link, dst).map_err(|e| SmbError::local(dst, e))
}

#[cfg(not(unix))]
fn copy_link(src: &Path, _dst: &Path) -> Result<(), SmbError> {
    tracing::debug!(path = %src.display(), "skipping symlink");
    Ok(())
}

impl Default for FsAccessor {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalAccessor for FsAccessor {
    fn probe_mode(&self, path: &Path) -> Result<Mode, SmbError> {
        let meta = fs::metadata(path).map_err(|e| SmbError::local(path, e))?;
        Ok(if meta.is_dir() { Mode::Directory } else { Mode::File })
    }

    fn copy_dir(&self, src: &Path, dst: &Path) -> Result<(), SmbError> {
        let meta = fs::metadata(src).map_err(|e| SmbError::local(src, e))?;
        if !meta.is_dir() {
            return Err(SmbError::NotADirectory {
                name: src.display().to_string(),
            });
        }
        fs::create_dir_all(dst).map_err(|e| SmbError::local(dst, e))?;

        for entry in WalkDir::new(src).min_depth(1) {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(src).to_path_buf();
                SmbError::local(path, e.into())
            })?;
            let Ok(rel) = entry.path().strip_prefix(src) else {
                continue;
            };
            let target = dst.join(rel);
            let file_type = entry.file_type();
            if file_type.is_dir() {
                fs::create_dir_all(&target).map_err(|e| SmbError::local(&target, e))?;
            } else if file_type.is_symlink() {
                copy_link(entry.path(), &target)?;
            } else {
                fs::copy(entry.path(), &target).map_err(|e| SmbError::local(entry.path(), e))?;
            }
        }
        Ok(())
    }

    fn copy_file(&self, src: &Path, dst: &Path, cancel: &CancelToken) -> Result<(), SmbError> {
        let meta = fs::metadata(src).map_err(|e| SmbError::local(src, e))?;
        if meta.is_dir() {
            return Err(SmbError::NotAFile {
                name: src.display().to_string(),
            });
        }
        cancel.check()?;

        let parent = dst
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent).map_err(|e| SmbError::CreateDestination {
            path: parent.to_path_buf(),
            source: e,
        })?;

        // The copy lands in a sibling temp file and replaces `dst` only once
        // complete; dropping the temp file on error discards it.
        let mut tmp = NamedTempFile::new_in(parent).map_err(|e| SmbError::local(parent, e))?;
        self.copy_into(src, dst, tmp.as_file_mut(), cancel)?;
        tmp.persist(dst).map_err(|e| SmbError::local(dst, e.error))?;

        // Permission bits are best effort; the data is already in place.
        if let Err(e) = fs::set_permissions(dst, meta.permissions()) {
            tracing::debug!(path = %dst.display(), "could not copy permissions: {}", e);
        }
        Ok(())
    }
}

/// Reaches the share through a local mount under `root` (`/` by default).
pub struct LocalMountStrategy<A = FsAccessor> {
    accessor: A,
    root: PathBuf,
}

impl LocalMountStrategy<FsAccessor> {
    pub fn new() -> Self {
        Self::with_accessor(FsAccessor::new())
    }
}

impl Default for LocalMountStrategy<FsAccessor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: LocalAccessor> LocalMountStrategy<A> {
    pub fn with_accessor(accessor: A) -> Self {
        Self {
            accessor,
            root: PathBuf::from("/"),
        }
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn accessor(&self) -> &A {
        &self.accessor
    }

    fn source(&self, locator: &ResourceLocator) -> PathBuf {
        locator.local_mount_path(&self.root)
    }
}

impl<A: LocalAccessor> FetchStrategy for LocalMountStrategy<A> {
    fn name(&self) -> &'static str {
        LOCAL_STRATEGY
    }

    fn mode(&self, locator: &ResourceLocator) -> Result<Mode, SmbError> {
        let path = self.source(locator);
        tracing::debug!(path = %path.display(), "probing local mount");
        self.accessor.probe_mode(&path)
    }

    fn get_dir(&self, locator: &ResourceLocator, dst: Option<&Path>) -> Result<(), SmbError> {
        let src = self.source(locator);
        let dst = dst.unwrap_or_else(|| Path::new("."));
        self.accessor.copy_dir(&src, dst)
    }

    fn get_file(
        &self,
        locator: &ResourceLocator,
        dst: Option<&Path>,
        cancel: &CancelToken,
    ) -> Result<(), SmbError> {
        let src = self.source(locator);
        let dst = match dst {
            Some(d) => d.to_path_buf(),
            None => match src.file_name() {
                Some(name) => PathBuf::from(name),
                None => return Err(SmbError::MissingFilePath),
            },
        };
        self.accessor.copy_file(&src, &dst, cancel)
    }
}

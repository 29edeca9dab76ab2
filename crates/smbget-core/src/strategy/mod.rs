//! The two ways of reaching a share: through a local mount, or through the
//! external client. Both implement [`FetchStrategy`]; the getter tries them
//! in order.

mod client;
mod local;

use std::io;
use std::path::Path;

pub use client::{SmbClientStrategy, CLIENT_STRATEGY};
pub use local::{FsAccessor, LocalAccessor, LocalMountStrategy, LOCAL_STRATEGY};

use crate::cancel::CancelToken;
use crate::error::SmbError;
use crate::locator::ResourceLocator;
use crate::mode::Mode;

/// One backend able to probe and fetch share objects.
pub trait FetchStrategy: Send + Sync {
    /// Short name used in logs and aggregated errors.
    fn name(&self) -> &'static str;

    fn mode(&self, locator: &ResourceLocator) -> Result<Mode, SmbError>;

    /// Recursively fetches a directory into `dst`.
    fn get_dir(&self, locator: &ResourceLocator, dst: Option<&Path>) -> Result<(), SmbError>;

    /// Fetches a single file to `dst`. Strategies that cannot be interrupted
    /// ignore `cancel`.
    fn get_file(
        &self,
        locator: &ResourceLocator,
        dst: Option<&Path>,
        cancel: &CancelToken,
    ) -> Result<(), SmbError>;
}

/// `Ok(true)` if `path` exists (without following a final symlink).
pub(crate) fn path_exists(path: &Path) -> Result<bool, SmbError> {
    match std::fs::symlink_metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(SmbError::local(path, e)),
    }
}

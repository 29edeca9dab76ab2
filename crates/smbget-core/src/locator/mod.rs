//! Share locators: host, share path, optional credentials.
//!
//! A locator arrives already decomposed (see [`ResourceLocator::from_url`] for
//! the `smb://` convenience). This module splits it into the `//host/share`
//! prefix the client connects to and the object path inside the share, and
//! derives the candidate path of a local mount.

mod parse_url;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::SmbError;

/// Username/password pair forwarded to the external client as `-U user[%password]`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: Option<String>,
}

impl Credentials {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: None,
        }
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Structured address of a remote object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLocator {
    pub host: String,
    /// Full path below the host: `/share/dir/object`.
    pub path: String,
    pub credentials: Option<Credentials>,
}

impl ResourceLocator {
    pub fn new(host: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            path: path.into(),
            credentials: None,
        }
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Rejects locators with an empty host or path.
    pub fn validate(&self) -> Result<(), SmbError> {
        if self.host.is_empty() || self.path.is_empty() {
            return Err(SmbError::MalformedLocator);
        }
        Ok(())
    }

    /// Splits the path into the `//host/share` prefix and the object path.
    ///
    /// The leading separator is stripped, then the path is split once at the
    /// next separator. Both parts must be non-empty.
    pub fn split_share(&self) -> Result<ShareTarget, SmbError> {
        let trimmed = self.path.strip_prefix('/').unwrap_or(&self.path);
        match trimmed.split_once('/') {
            Some((share, object)) if !share.is_empty() && !object.is_empty() => Ok(ShareTarget {
                host_share: format!("//{}/{}", self.host, share),
                object_path: object.to_string(),
            }),
            _ => Err(SmbError::MissingFilePath),
        }
    }

    /// Where the object would appear if the share were mounted under `root`.
    ///
    /// With `root = "/"` this is `"/" + host + path`; on Windows an extra
    /// leading separator turns it into a UNC-style `//host/share/...` path.
    pub fn local_mount_path(&self, root: &Path) -> PathBuf {
        let mut s = String::new();
        if cfg!(windows) {
            s.push('/');
        }
        s.push_str(root.to_string_lossy().trim_end_matches('/'));
        s.push('/');
        s.push_str(&self.host);
        if !self.path.starts_with('/') {
            s.push('/');
        }
        s.push_str(&self.path);
        PathBuf::from(s)
    }
}

/// Result of the share split: what the client connects to and what it looks up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareTarget {
    /// `//host/share`
    pub host_share: String,
    /// Object path relative to the share root, never empty.
    pub object_path: String,
}

impl ShareTarget {
    /// `(parent directory, leaf name)` of the object path.
    ///
    /// An object path without a separator lives in the share root, reported as `"."`.
    pub fn split_leaf(&self) -> (&str, &str) {
        match self.object_path.rsplit_once('/') {
            Some((parent, leaf)) => (parent, leaf),
            None => (".", &self.object_path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_empty_host_or_path() {
        assert!(matches!(
            ResourceLocator::new("", "/share/file").validate(),
            Err(SmbError::MalformedLocator)
        ));
        assert!(matches!(
            ResourceLocator::new("nas.local", "").validate(),
            Err(SmbError::MalformedLocator)
        ));
        assert!(ResourceLocator::new("nas.local", "/share/file")
            .validate()
            .is_ok());
    }

    #[test]
    fn split_share_nested_object() {
        let t = ResourceLocator::new("nas.local", "/shared/docs/report.txt")
            .split_share()
            .unwrap();
        assert_eq!(t.host_share, "//nas.local/shared");
        assert_eq!(t.object_path, "docs/report.txt");
        assert_eq!(t.split_leaf(), ("docs", "report.txt"));
    }

    #[test]
    fn split_share_object_in_root() {
        let t = ResourceLocator::new("nas.local", "/shared/report.txt")
            .split_share()
            .unwrap();
        assert_eq!(t.object_path, "report.txt");
        assert_eq!(t.split_leaf(), (".", "report.txt"));
    }

    #[test]
    fn split_share_deep_parent() {
        let t = ResourceLocator::new("h", "/s/a/b/c.bin").split_share().unwrap();
        assert_eq!(t.split_leaf(), ("a/b", "c.bin"));
    }

    #[test]
    fn split_share_missing_file_path() {
        for path in ["/shared", "/shared/", "shared", "/", "//docs"] {
            let err = ResourceLocator::new("nas.local", path)
                .split_share()
                .unwrap_err();
            assert!(
                matches!(err, SmbError::MissingFilePath),
                "{path:?} should be missing a file path"
            );
        }
    }

    #[cfg(not(windows))]
    #[test]
    fn local_mount_path_default_root() {
        let loc = ResourceLocator::new("nas.local", "/shared/docs/report.txt");
        assert_eq!(
            loc.local_mount_path(Path::new("/")),
            PathBuf::from("/nas.local/shared/docs/report.txt")
        );
        assert_eq!(
            loc.local_mount_path(Path::new("/mnt/smb/")),
            PathBuf::from("/mnt/smb/nas.local/shared/docs/report.txt")
        );
    }

    #[test]
    fn credentials_debug_masks_password() {
        let c = Credentials::new("alice").with_password("hunter2");
        let dbg = format!("{:?}", c);
        assert!(dbg.contains("alice"));
        assert!(!dbg.contains("hunter2"));
    }
}

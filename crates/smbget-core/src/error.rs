//! Error kinds for locator validation, both fetch strategies, and the
//! aggregate reported when every strategy failed.

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::cancel::Cancelled;

/// Shape error reported for locators without a host or a path.
pub const BASE_PATH_ERROR: &str = "samba path should contain valid host, filepath, and authentication if necessary (smb://<user>:<password>@<host>/<file_path>)";

#[derive(Debug, thiserror::Error)]
pub enum SmbError {
    #[error("{}", BASE_PATH_ERROR)]
    MalformedLocator,

    #[error("missing file path: can not find file path and/or name in the smb url")]
    MissingFilePath,

    #[error("unsupported scheme {0:?}, expected smb")]
    UnsupportedScheme(String),

    #[error("invalid smb url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The client answered the metadata probe with `OBJECT_NAME_NOT_FOUND`.
    #[error("source path not found: {output}")]
    SourceNotFound { output: String },

    #[error("{name} source path must be a directory")]
    NotADirectory { name: String },

    #[error("{name} source path must be a file")]
    NotAFile { name: String },

    #[error("{program} exited with {status}: {output}")]
    ExitStatus {
        program: String,
        status: i32,
        output: String,
    },

    #[error("{program} was terminated by a signal: {output}")]
    Terminated { program: String, output: String },

    /// The shell (and so the client) could not be started at all.
    #[error("error running {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{}: {source}", .path.display())]
    Local {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create destination path {}: {source}", .path.display())]
    CreateDestination {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid checksum {0:?}, expected sha256:<hex>")]
    InvalidChecksum(String),

    #[error("checksum mismatch for {}: expected {expected}, got {actual}", .path.display())]
    ChecksumMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error(transparent)]
    Cancelled(#[from] Cancelled),

    #[error(transparent)]
    Unavailable(#[from] AggregateError),
}

impl SmbError {
    pub(crate) fn local(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SmbError::Local {
            path: path.into(),
            source,
        }
    }

    /// True for the shape errors that are reported before any strategy runs.
    pub fn is_malformed_locator(&self) -> bool {
        matches!(self, SmbError::MalformedLocator | SmbError::MissingFilePath)
    }
}

/// Every failure from every attempted strategy, in attempt order.
#[derive(Debug, Default)]
pub struct AggregateError {
    causes: Vec<(&'static str, SmbError)>,
}

impl AggregateError {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, strategy: &'static str, err: SmbError) {
        self.causes.push((strategy, err));
    }

    /// `(strategy name, error)` pairs, local mount first when it was attempted.
    pub fn causes(&self) -> impl Iterator<Item = (&'static str, &SmbError)> + '_ {
        self.causes.iter().map(|(name, err)| (*name, err))
    }

    pub fn len(&self) -> usize {
        self.causes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.causes.is_empty()
    }
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "one of the options should be available: \n 1. local mount of the smb shared folder or; \n 2. smbclient cli installed. \n err: "
        )?;
        match self.causes.len() {
            0 => return write!(f, "no strategy attempted"),
            1 => write!(f, "1 error occurred:")?,
            n => write!(f, "{} errors occurred:", n)?,
        }
        for (name, err) in &self.causes {
            write!(f, "\n\t* {}: {}", name, err)?;
        }
        Ok(())
    }
}

impl std::error::Error for AggregateError {}

//! What a remote object turned out to be.

use std::fmt;

/// Kind of object a locator resolves to.
///
/// Only a strategy that actually reached the object produces `File` or
/// `Directory`; failed resolution reports `Unknown` alongside its error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Unknown,
    File,
    Directory,
}

impl Mode {
    pub fn is_dir(self) -> bool {
        self == Mode::Directory
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Unknown => write!(f, "unknown"),
            Mode::File => write!(f, "file"),
            Mode::Directory => write!(f, "directory"),
        }
    }
}

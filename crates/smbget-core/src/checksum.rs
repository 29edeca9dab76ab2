//! Post-fetch checksum verification, given as `sha256:<hex>`.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use crate::error::SmbError;

const BUF_SIZE: usize = 64 * 1024;

/// Expected digest of a fetched file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checksum {
    /// Lowercase hex SHA-256.
    sha256: String,
}

impl FromStr for Checksum {
    type Err = SmbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SmbError::InvalidChecksum(s.to_string());
        let (kind, value) = s.split_once(':').ok_or_else(invalid)?;
        if !kind.eq_ignore_ascii_case("sha256") {
            return Err(invalid());
        }
        let bytes = hex::decode(value).map_err(|_| invalid())?;
        if bytes.len() != 32 {
            return Err(invalid());
        }
        Ok(Self {
            sha256: hex::encode(bytes),
        })
    }
}

impl Checksum {
    /// Checks `path` against the expected digest.
    pub fn verify(&self, path: &Path) -> Result<(), SmbError> {
        let actual = sha256_path(path)?;
        if actual != self.sha256 {
            return Err(SmbError::ChecksumMismatch {
                path: path.to_path_buf(),
                expected: self.sha256.clone(),
                actual,
            });
        }
        Ok(())
    }

    /// Like [`verify`](Self::verify), but removes the file on mismatch.
    pub fn verify_or_remove(&self, path: &Path) -> Result<(), SmbError> {
        let result = self.verify(path);
        if let Err(SmbError::ChecksumMismatch { .. }) = &result {
            if let Err(e) = std::fs::remove_file(path) {
                tracing::warn!(path = %path.display(), "could not remove mismatched file: {}", e);
            }
        }
        result
    }
}

/// SHA-256 of a file as lowercase hex, read in bounded chunks.
pub fn sha256_path(path: &Path) -> Result<String, SmbError> {
    let mut f = File::open(path).map_err(|e| SmbError::local(path, e))?;
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; BUF_SIZE];
    loop {
        let n = f.read(&mut buf).map_err(|e| SmbError::local(path, e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

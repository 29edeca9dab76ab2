//! `smb://[user[:password]@]host/share/path` decomposition.

use url::Url;

use super::{Credentials, ResourceLocator};
use crate::error::SmbError;

impl ResourceLocator {
    /// Decomposes an `smb://` URL into a locator.
    ///
    /// The path and userinfo are percent-decoded. Shape checks (non-empty host
    /// and path, presence of an object path) are left to the fetch operations.
    pub fn from_url(input: &str) -> Result<Self, SmbError> {
        let parsed = Url::parse(input)?;
        if parsed.scheme() != "smb" {
            return Err(SmbError::UnsupportedScheme(parsed.scheme().to_string()));
        }

        let host = parsed.host_str().unwrap_or_default().to_string();
        let path = decode(parsed.path());

        let credentials = match parsed.username() {
            "" => None,
            user => Some(Credentials {
                username: decode(user),
                password: parsed.password().map(decode),
            }),
        };

        Ok(Self {
            host,
            path,
            credentials,
        })
    }
}

fn decode(s: &str) -> String {
    String::from_utf8_lossy(&urlencoding::decode_binary(s.as_bytes())).into_owned()
}

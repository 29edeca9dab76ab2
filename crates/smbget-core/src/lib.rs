pub mod config;
pub mod logging;

pub mod cancel;
pub mod checksum;
pub mod command;
pub mod error;
pub mod getter;
pub mod locator;
pub mod mode;
pub mod strategy;

pub use cancel::CancelToken;
pub use error::{AggregateError, SmbError};
pub use getter::SmbGetter;
pub use locator::{Credentials, ResourceLocator};
pub use mode::Mode;

#[cfg(test)]
pub(crate) mod test_support;

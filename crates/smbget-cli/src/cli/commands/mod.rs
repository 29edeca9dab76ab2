//! CLI command handlers, one per file.

mod auto;
mod completions;
mod get;
mod get_file;
mod mode;

pub use auto::run_auto;
pub use completions::run_completions;
pub use get::run_get;
pub use get_file::run_get_file;
pub use mode::run_mode;

//! Driving the external share client: building its command line, running it
//! through a shell, and reading its answers.

mod builder;
mod executor;
mod probe;

pub use builder::{build_base_command, BaseCommand, CommandLine, Subcommand};
pub use executor::{CommandRunner, ShellRunner};
pub use probe::{is_directory, parse_allinfo, DIRECTORY_MARKER, NOT_FOUND_MARKER};

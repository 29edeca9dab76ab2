//! CLI for smbget.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use smbget_core::config;
use smbget_core::SmbGetter;
use std::path::PathBuf;

use commands::{run_auto, run_completions, run_get, run_get_file, run_mode};

/// Top-level CLI for smbget.
#[derive(Debug, Parser)]
#[command(name = "smbget")]
#[command(
    about = "Fetch files and directories from SMB shares via a local mount or smbclient",
    long_about = None
)]
pub struct Cli {
    /// Log at debug level (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Report whether an smb:// URL points at a file or a directory.
    Mode {
        /// smb://[user[:password]@]host/share/path
        url: String,
    },

    /// Recursively fetch a directory.
    Get {
        /// smb://[user[:password]@]host/share/path
        url: String,
        /// Destination directory (default: current directory).
        #[arg(long, value_name = "DIR")]
        dest: Option<PathBuf>,
    },

    /// Fetch a single file.
    GetFile {
        /// smb://[user[:password]@]host/share/path
        url: String,
        /// Destination file (default: the file's own name in the current directory).
        #[arg(long, value_name = "FILE")]
        dest: Option<PathBuf>,
        /// Verify the fetched file, e.g. sha256:<hex>. The file is removed on mismatch.
        #[arg(long, value_name = "TYPE:VALUE")]
        checksum: Option<String>,
    },

    /// Detect the mode first, then fetch a file or a directory accordingly.
    Auto {
        /// smb://[user[:password]@]host/share/path
        url: String,
        /// Destination path.
        #[arg(long, value_name = "PATH")]
        dest: Option<PathBuf>,
    },

    /// Print shell completions to stdout.
    Completions {
        shell: clap_complete::Shell,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            CliCommand::Mode { url } => run_mode(&load_getter()?, &url)?,
            CliCommand::Get { url, dest } => run_get(&load_getter()?, &url, dest.as_deref())?,
            CliCommand::GetFile {
                url,
                dest,
                checksum,
            } => run_get_file(
                &load_getter()?,
                &url,
                dest.as_deref(),
                checksum.as_deref(),
            )?,
            CliCommand::Auto { url, dest } => run_auto(&load_getter()?, &url, dest.as_deref())?,
            CliCommand::Completions { shell } => run_completions(shell),
        }

        Ok(())
    }
}

fn load_getter() -> Result<SmbGetter> {
    let cfg = config::load_or_init()?;
    tracing::debug!("loaded config: {:?}", cfg);
    Ok(SmbGetter::from_config(&cfg))
}

#[cfg(test)]
mod tests;

//! External-client strategy: talk to the share through `smbclient`.
//!
//! Each operation first probes the object with `allinfo`, then issues the
//! transfer subcommand. The subprocess runs to completion once started;
//! there is no cancellation hook on this path.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use super::{path_exists, FetchStrategy};
use crate::cancel::CancelToken;
use crate::command::{build_base_command, is_directory, CommandRunner, ShellRunner, Subcommand};
use crate::error::SmbError;
use crate::locator::ResourceLocator;
use crate::mode::Mode;

pub const CLIENT_STRATEGY: &str = "smbclient";

const DEFAULT_PROGRAM: &str = "smbclient";

pub struct SmbClientStrategy {
    runner: Arc<dyn CommandRunner>,
    program: String,
}

impl SmbClientStrategy {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            runner,
            program: DEFAULT_PROGRAM.to_string(),
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }
}

impl Default for SmbClientStrategy {
    fn default() -> Self {
        Self::new(Arc::new(ShellRunner::default()))
    }
}

impl FetchStrategy for SmbClientStrategy {
    fn name(&self) -> &'static str {
        CLIENT_STRATEGY
    }

    fn mode(&self, locator: &ResourceLocator) -> Result<Mode, SmbError> {
        let target = locator.split_share()?;
        let (parent, leaf) = target.split_leaf();
        let base = build_base_command(
            &self.program,
            locator.credentials.as_ref(),
            &target.host_share,
            parent,
        );
        if is_directory(self.runner.as_ref(), &base, leaf)? {
            Ok(Mode::Directory)
        } else {
            Ok(Mode::File)
        }
    }

    fn get_dir(&self, locator: &ResourceLocator, dst: Option<&Path>) -> Result<(), SmbError> {
        let target = locator.split_share()?;
        let creds = locator.credentials.as_ref();

        let root = build_base_command(&self.program, creds, &target.host_share, ".");
        if !is_directory(self.runner.as_ref(), &root, &target.object_path)? {
            return Err(SmbError::NotADirectory {
                name: target.object_path,
            });
        }

        if let Some(dst) = dst {
            if !path_exists(dst)? {
                fs::create_dir_all(dst).map_err(|source| SmbError::CreateDestination {
                    path: dst.to_path_buf(),
                    source,
                })?;
            }
        }

        // mget writes into the process working directory, so the transfer
        // runs inside the destination.
        let scoped = build_base_command(&self.program, creds, &target.host_share, &target.object_path);
        self.runner
            .run(&scoped.with_subcommand(&Subcommand::MirrorAll), dst)?;
        Ok(())
    }

    fn get_file(
        &self,
        locator: &ResourceLocator,
        dst: Option<&Path>,
        _cancel: &CancelToken,
    ) -> Result<(), SmbError> {
        let target = locator.split_share()?;
        let (parent, leaf) = target.split_leaf();
        let base = build_base_command(
            &self.program,
            locator.credentials.as_ref(),
            &target.host_share,
            parent,
        );
        if is_directory(self.runner.as_ref(), &base, leaf)? {
            return Err(SmbError::NotAFile {
                name: leaf.to_string(),
            });
        }

        if let Some(dst) = dst {
            if !path_exists(dst)? {
                if let Some(dir) = dst.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(dir).map_err(|source| SmbError::CreateDestination {
                        path: dir.to_path_buf(),
                        source,
                    })?;
                }
            }
        }

        let get = Subcommand::Get {
            file: leaf.to_string(),
            dest: dst.map(Path::to_path_buf),
        };
        self.runner.run(&base.with_subcommand(&get), None)?;
        Ok(())
    }
}

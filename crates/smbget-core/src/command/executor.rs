//! Runs client command lines through a shell and captures their output.

use std::path::Path;
use std::process::{Command, Stdio};

use super::builder::CommandLine;
use crate::error::SmbError;

/// Seam between the strategies and the operating system's process table.
///
/// Implementations return the combined stdout/stderr text on success. A
/// non-zero exit must be reported as [`SmbError::ExitStatus`] carrying that
/// text; a failure to start at all as [`SmbError::Launch`].
pub trait CommandRunner: Send + Sync {
    fn run(&self, command: &CommandLine, working_dir: Option<&Path>) -> Result<String, SmbError>;
}

/// Runs command lines with `<shell> -c`, stderr folded into stdout.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell: String,
}

impl ShellRunner {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new("bash")
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command: &CommandLine, working_dir: Option<&Path>) -> Result<String, SmbError> {
        tracing::debug!(
            shell = %self.shell,
            dir = ?working_dir,
            "running: {}",
            command.redacted()
        );

        // Redirect inside the shell so both streams share one pipe and keep
        // their relative order.
        let mut cmd = Command::new(&self.shell);
        cmd.arg("-c")
            .arg(format!("exec 2>&1\n{}", command.as_str()))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = working_dir.filter(|d| !d.as_os_str().is_empty()) {
            cmd.current_dir(dir);
        }

        let out = cmd.output().map_err(|source| SmbError::Launch {
            program: self.shell.clone(),
            source,
        })?;

        let mut buf = String::from_utf8_lossy(&out.stdout).into_owned();
        buf.push_str(&String::from_utf8_lossy(&out.stderr));

        if out.status.success() {
            return Ok(buf);
        }
        match out.status.code() {
            Some(status) => Err(SmbError::ExitStatus {
                program: self.shell.clone(),
                status,
                output: buf,
            }),
            None => Err(SmbError::Terminated {
                program: self.shell.clone(),
                output: buf,
            }),
        }
    }
}

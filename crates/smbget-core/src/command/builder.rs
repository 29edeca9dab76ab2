//! Client command lines: `smbclient -N [-U user[%pass]] //host/share --directory <dir> --command '<sub>'`.

use std::path::PathBuf;

use crate::locator::Credentials;

/// Client invocation scoped to one directory of one share, without a subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseCommand {
    line: String,
    redacted: String,
}

/// Builds the base invocation of `program`.
///
/// The client always runs non-interactively (`-N`). A username adds `-U user`,
/// or `-U user%password` when a password accompanies it.
pub fn build_base_command(
    program: &str,
    credentials: Option<&Credentials>,
    host_share: &str,
    directory: &str,
) -> BaseCommand {
    let mut line = format!("{} -N", program);
    let mut redacted = line.clone();

    if let Some(creds) = credentials.filter(|c| !c.username.is_empty()) {
        line.push_str(" -U ");
        line.push_str(&creds.username);
        redacted.push_str(" -U ");
        redacted.push_str(&creds.username);
        if let Some(password) = &creds.password {
            line.push('%');
            line.push_str(password);
            redacted.push_str("%***");
        }
    }

    let tail = format!(" {} --directory {}", host_share, directory);
    line.push_str(&tail);
    redacted.push_str(&tail);

    BaseCommand { line, redacted }
}

impl BaseCommand {
    pub fn as_str(&self) -> &str {
        &self.line
    }

    /// Appends `--command '<subcommand>'`.
    pub fn with_subcommand(&self, sub: &Subcommand) -> CommandLine {
        let clause = format!(" --command '{}'", sub.render());
        CommandLine {
            line: format!("{}{}", self.line, clause),
            redacted: format!("{}{}", self.redacted, clause),
        }
    }
}

/// Client subcommands.
///
/// # Trusted input only
///
/// Object names are interpolated inside single quotes with no further
/// escaping. A name containing `'` or shell metacharacters changes the
/// command the shell runs, so only names from a trusted source may be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subcommand {
    /// `allinfo <object>`: metadata probe.
    AllInfo(String),
    /// `prompt OFF;recurse ON; mget *`: mirror the working directory recursively.
    MirrorAll,
    /// `get <file> [dest]`: single file download.
    Get { file: String, dest: Option<PathBuf> },
}

impl Subcommand {
    pub fn render(&self) -> String {
        match self {
            Subcommand::AllInfo(object) => format!("allinfo {}", object),
            Subcommand::MirrorAll => "prompt OFF;recurse ON; mget *".to_string(),
            Subcommand::Get { file, dest: None } => format!("get {}", file),
            Subcommand::Get {
                file,
                dest: Some(dest),
            } => format!("get {} {}", file, dest.display()),
        }
    }
}

/// A complete command line ready for the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    line: String,
    redacted: String,
}

impl CommandLine {
    /// Wraps an arbitrary shell command line.
    pub fn raw(line: impl Into<String>) -> Self {
        let line = line.into();
        Self {
            redacted: line.clone(),
            line,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.line
    }

    /// Same command with any password replaced by `***`, for logs.
    pub fn redacted(&self) -> &str {
        &self.redacted
    }
}

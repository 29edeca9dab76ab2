//! Interpreting the client's `allinfo` answer.
//!
//! The markers below are matched verbatim against smbclient's output; a
//! different client must reproduce them for the probe to work.

use super::builder::{BaseCommand, Subcommand};
use super::executor::CommandRunner;
use crate::error::SmbError;

/// Present in the output when the probed object does not exist.
pub const NOT_FOUND_MARKER: &str = "OBJECT_NAME_NOT_FOUND";

/// Present in the output when the probed object is a directory.
pub const DIRECTORY_MARKER: &str = "attributes: D";

/// Reads an `allinfo` answer: `Ok(true)` for a directory, `Ok(false)` for a file.
pub fn parse_allinfo(output: &str) -> Result<bool, SmbError> {
    if output.contains(NOT_FOUND_MARKER) {
        return Err(SmbError::SourceNotFound {
            output: output.to_string(),
        });
    }
    Ok(output.contains(DIRECTORY_MARKER))
}

/// Probes `object` relative to the directory `base` is scoped to.
///
/// A client that exits non-zero while reporting the not-found marker is
/// treated as a not-found answer rather than a generic exit failure.
pub fn is_directory(
    runner: &dyn CommandRunner,
    base: &BaseCommand,
    object: &str,
) -> Result<bool, SmbError> {
    let cmd = base.with_subcommand(&Subcommand::AllInfo(object.to_string()));
    match runner.run(&cmd, None) {
        Ok(output) => parse_allinfo(&output),
        Err(SmbError::ExitStatus { output, .. }) if output.contains(NOT_FOUND_MARKER) => {
            Err(SmbError::SourceNotFound { output })
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILE_INFO: &str = "altname: REPORT~1.TXT
create_time:    Tue Mar  5 10:12:01 2024 CET
change_time:    Tue Mar  5 10:12:01 2024 CET
attributes: A (20)
stream: [::$DATA], 5120 bytes
";

    const DIR_INFO: &str = "altname: docs
create_time:    Tue Mar  5 10:12:01 2024 CET
attributes: D (10)
";

    #[test]
    fn directory_marker() {
        assert!(parse_allinfo(DIR_INFO).unwrap());
    }

    #[test]
    fn file_without_marker() {
        assert!(!parse_allinfo(FILE_INFO).unwrap());
        assert!(!parse_allinfo("").unwrap());
    }

    #[test]
    fn not_found_keeps_raw_output() {
        let raw = "NT_STATUS_OBJECT_NAME_NOT_FOUND opening remote file \\docs\\nope";
        match parse_allinfo(raw) {
            Err(SmbError::SourceNotFound { output }) => assert_eq!(output, raw),
            other => panic!("expected SourceNotFound, got {other:?}"),
        }
        let msg = parse_allinfo(raw).unwrap_err().to_string();
        assert!(msg.starts_with("source path not found"));
        assert!(msg.contains(raw));
    }

    #[test]
    fn not_found_wins_over_directory_marker() {
        let raw = "attributes: D\nOBJECT_NAME_NOT_FOUND";
        assert!(parse_allinfo(raw).is_err());
    }
}

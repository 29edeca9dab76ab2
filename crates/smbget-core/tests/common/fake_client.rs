//! A shell script standing in for smbclient.
//!
//! It records `<directory>|<subcommand>` for every invocation, answers
//! `allinfo` for one known file and one known directory, and serves `get`
//! for the file by writing fixed content.

use std::fs;
use std::path::{Path, PathBuf};

pub const FILE_CONTENT: &str = "quarterly";

pub struct FakeClient {
    /// Command prefix to configure as the client program.
    pub program: String,
    pub log: PathBuf,
}

impl FakeClient {
    /// Installs the script into `dir`.
    pub fn install(dir: &Path) -> Self {
        let script_path = dir.join("fake-smbclient");
        let log = dir.join("calls.log");
        let script = format!(
            r#"#!/bin/sh
while [ $# -gt 0 ]; do
  case "$1" in
    --directory) dir="$2"; shift 2 ;;
    --command) cmd="$2"; shift 2 ;;
    *) shift ;;
  esac
done
echo "$dir|$cmd" >> "{log}"
case "$cmd" in
  "allinfo report.txt") echo "altname: REPORT~1.TXT"; echo "attributes: A (20)" ;;
  "allinfo docs") echo "attributes: D (10)" ;;
  allinfo*) echo "NT_STATUS_OBJECT_NAME_NOT_FOUND opening remote file"; exit 1 ;;
  "get report.txt") printf '{content}' > report.txt ;;
  "get report.txt "*) printf '{content}' > "${{cmd#get report.txt }}" ;;
  "prompt OFF;recurse ON; mget *") printf '{content}' > report.txt ;;
  *) echo "unexpected command: $cmd"; exit 2 ;;
esac
"#,
            log = log.display(),
            content = FILE_CONTENT,
        );
        fs::write(&script_path, script).unwrap();
        // Run through `sh` rather than exec'ing a freshly written file, which
        // can fail with ETXTBSY while other test threads fork.
        let program = format!("sh {}", script_path.display());
        Self { program, log }
    }

    /// Recorded `<directory>|<subcommand>` lines, empty if never invoked.
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(&self.log)
            .map(|s| s.lines().map(String::from).collect())
            .unwrap_or_default()
    }
}

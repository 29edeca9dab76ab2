//! Fakes for the two collaborators: a scripted client and a scripted mount.

use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::cancel::CancelToken;
use crate::command::{CommandLine, CommandRunner};
use crate::error::SmbError;
use crate::mode::Mode;
use crate::strategy::LocalAccessor;

pub(crate) const FILE_INFO: &str = "altname: REPORT~1.TXT\nattributes: A (20)\n";
pub(crate) const DIR_INFO: &str = "altname: docs\nattributes: D (10)\n";
pub(crate) const NOT_FOUND: &str = "NT_STATUS_OBJECT_NAME_NOT_FOUND listing \\nope";

/// Replays queued results and records every command line it was given.
/// Once the queue is empty it behaves like a missing shell.
#[derive(Default)]
pub(crate) struct FakeRunner {
    replies: Mutex<VecDeque<Result<String, SmbError>>>,
    calls: Mutex<Vec<(String, Option<PathBuf>)>>,
}

impl FakeRunner {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn reply(&self, output: &str) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Ok(output.to_string()));
        self
    }

    pub(crate) fn reply_exit(&self, status: i32, output: &str) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(SmbError::ExitStatus {
                program: "bash".to_string(),
                status,
                output: output.to_string(),
            }));
        self
    }

    pub(crate) fn calls(&self) -> Vec<(String, Option<PathBuf>)> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn commands(&self) -> Vec<String> {
        self.calls().into_iter().map(|(c, _)| c).collect()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, command: &CommandLine, working_dir: Option<&Path>) -> Result<String, SmbError> {
        self.calls
            .lock()
            .unwrap()
            .push((command.as_str().to_string(), working_dir.map(Path::to_path_buf)));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(SmbError::Launch {
                    program: "bash".to_string(),
                    source: io::Error::from(io::ErrorKind::NotFound),
                })
            })
    }
}

/// Mount that either holds one object of a fixed mode or is absent.
#[derive(Clone)]
pub(crate) struct FakeAccessor {
    mode: Option<Mode>,
    calls: Arc<AtomicUsize>,
    paths: Arc<Mutex<Vec<PathBuf>>>,
}

impl FakeAccessor {
    pub(crate) fn mounted(mode: Mode) -> Self {
        Self {
            mode: Some(mode),
            calls: Arc::default(),
            paths: Arc::default(),
        }
    }

    pub(crate) fn unmounted() -> Self {
        Self {
            mode: None,
            calls: Arc::default(),
            paths: Arc::default(),
        }
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn paths(&self) -> Vec<PathBuf> {
        self.paths.lock().unwrap().clone()
    }

    fn touch(&self, path: &Path) -> Result<Mode, SmbError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.paths.lock().unwrap().push(path.to_path_buf());
        self.mode
            .ok_or_else(|| SmbError::local(path, io::Error::from(io::ErrorKind::NotFound)))
    }
}

impl LocalAccessor for FakeAccessor {
    fn probe_mode(&self, path: &Path) -> Result<Mode, SmbError> {
        self.touch(path)
    }

    fn copy_dir(&self, src: &Path, _dst: &Path) -> Result<(), SmbError> {
        self.touch(src).map(|_| ())
    }

    fn copy_file(&self, src: &Path, _dst: &Path, cancel: &CancelToken) -> Result<(), SmbError> {
        self.touch(src)?;
        cancel.check()?;
        Ok(())
    }
}

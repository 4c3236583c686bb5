//! Host I/O capability
//!
//! Every component that touches the filesystem, the executable search path,
//! or child processes does so through a [`HostIo`] passed in at construction.
//! [`SystemIo`] is the real implementation; tests substitute their own.

use async_trait::async_trait;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

/// Captured result of a finished child process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, `None` if the process was terminated by a signal
    pub status: Option<i32>,
    pub success: bool,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ProcessOutput {
    /// Successful exit with the given output
    pub fn success(stdout: impl Into<Vec<u8>>, stderr: impl Into<Vec<u8>>) -> Self {
        Self {
            status: Some(0),
            success: true,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Failed exit with the given code and stderr
    pub fn failure(code: i32, stderr: impl Into<Vec<u8>>) -> Self {
        Self {
            status: Some(code),
            success: false,
            stdout: Vec::new(),
            stderr: stderr.into(),
        }
    }
}

impl From<std::process::Output> for ProcessOutput {
    fn from(output: std::process::Output) -> Self {
        Self {
            status: output.status.code(),
            success: output.status.success(),
            stdout: output.stdout,
            stderr: output.stderr,
        }
    }
}

/// Filesystem, search-path and process access used by the pipeline
#[async_trait]
pub trait HostIo: Send + Sync + 'static {
    /// Create a uniquely named directory under `root` whose name starts with `prefix`
    async fn create_workspace(&self, root: &Path, prefix: &str) -> io::Result<PathBuf>;

    /// Recursively remove a workspace directory
    ///
    /// A directory that is already gone counts as removed.
    async fn remove_workspace(&self, path: &Path) -> io::Result<()>;

    /// Blocking variant of [`remove_workspace`](Self::remove_workspace), used
    /// from `Drop` when a run is abandoned mid-flight
    fn remove_workspace_blocking(&self, path: &Path) -> io::Result<()>;

    /// Resolve an executable name (or explicit path) to an absolute path
    async fn find_executable(&self, name: &Path) -> Option<PathBuf>;

    /// Run a program to completion, capturing stdout and stderr
    async fn run_process(&self, program: &Path, args: &[OsString]) -> io::Result<ProcessOutput>;

    /// Read a whole file
    async fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// [`HostIo`] backed by the real operating system
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemIo;

impl SystemIo {
    pub fn new() -> Self {
        Self
    }
}

fn ignore_not_found(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

#[async_trait]
impl HostIo for SystemIo {
    async fn create_workspace(&self, root: &Path, prefix: &str) -> io::Result<PathBuf> {
        let root = root.to_path_buf();
        let prefix = prefix.to_string();
        // The blocking task outlives a cancelled caller. Until `keep` runs
        // below, the directory belongs to the `TempDir`, so a result nobody
        // awaits is removed when it is dropped.
        let dir = tokio::task::spawn_blocking(move || -> io::Result<tempfile::TempDir> {
            std::fs::create_dir_all(&root)?;
            tempfile::Builder::new().prefix(&prefix).tempdir_in(&root)
        })
        .await
        .map_err(io::Error::other)??;
        Ok(dir.keep())
    }

    async fn remove_workspace(&self, path: &Path) -> io::Result<()> {
        ignore_not_found(tokio::fs::remove_dir_all(path).await)
    }

    fn remove_workspace_blocking(&self, path: &Path) -> io::Result<()> {
        ignore_not_found(std::fs::remove_dir_all(path))
    }

    async fn find_executable(&self, name: &Path) -> Option<PathBuf> {
        let name = name.to_path_buf();
        tokio::task::spawn_blocking(move || which::which(&name).ok())
            .await
            .ok()
            .flatten()
    }

    async fn run_process(&self, program: &Path, args: &[OsString]) -> io::Result<ProcessOutput> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await?;
        Ok(output.into())
    }

    async fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        tokio::fs::read(path).await
    }
}

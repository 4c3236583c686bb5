//! In-memory `HostIo` shared by the integration tests

#![allow(dead_code)]

use grpcweb_loader_pipeline::{HostIo, ProcessOutput};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

const OUT_FLAGS: [&str; 2] = ["--js_out=import_style=commonjs,binary:", "--js_service_out="];

#[derive(Default)]
pub struct FakeIo {
    executables: Mutex<HashMap<PathBuf, PathBuf>>,
    files: Mutex<HashMap<PathBuf, Vec<u8>>>,
    dirs: Mutex<HashSet<PathBuf>>,
    emitted: Mutex<Vec<(String, Vec<u8>)>>,
    response: Mutex<Option<ProcessOutput>>,
    invocations: Mutex<Vec<(PathBuf, Vec<OsString>)>>,
    created: AtomicUsize,
    fail_remove: Mutex<bool>,
    hang: Mutex<bool>,
}

impl FakeIo {
    /// Fake with `protoc` and `protoc-gen-js_service` installed under /usr/bin
    pub fn with_tools() -> Self {
        let io = Self::default();
        io.install("protoc");
        io.install("protoc-gen-js_service");
        io
    }

    pub fn install(&self, name: &str) {
        self.executables
            .lock()
            .insert(PathBuf::from(name), Path::new("/usr/bin").join(name));
    }

    /// File the fake compiler writes into its output directory on every run
    pub fn emit(&self, relative: &str, contents: impl Into<Vec<u8>>) {
        self.emitted
            .lock()
            .push((relative.to_string(), contents.into()));
    }

    pub fn respond(&self, output: ProcessOutput) {
        *self.response.lock() = Some(output);
    }

    pub fn put_file(&self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) {
        self.files.lock().insert(path.into(), contents.into());
    }

    pub fn fail_remove(&self) {
        *self.fail_remove.lock() = true;
    }

    /// Make every compiler run wait forever
    pub fn hang(&self) {
        *self.hang.lock() = true;
    }

    pub fn invocations(&self) -> Vec<(PathBuf, Vec<OsString>)> {
        self.invocations.lock().clone()
    }

    pub fn live_dirs(&self) -> Vec<PathBuf> {
        self.dirs.lock().iter().cloned().collect()
    }

    pub fn created_count(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        if *self.fail_remove.lock() {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        }
        self.dirs.lock().remove(path);
        self.files.lock().retain(|file, _| !file.starts_with(path));
        Ok(())
    }
}

#[async_trait]
impl HostIo for FakeIo {
    async fn create_workspace(&self, root: &Path, prefix: &str) -> io::Result<PathBuf> {
        let n = self.created.fetch_add(1, Ordering::SeqCst);
        let path = root.join(format!("{prefix}{n}"));
        self.dirs.lock().insert(path.clone());
        Ok(path)
    }

    async fn remove_workspace(&self, path: &Path) -> io::Result<()> {
        self.remove(path)
    }

    fn remove_workspace_blocking(&self, path: &Path) -> io::Result<()> {
        self.remove(path)
    }

    async fn find_executable(&self, name: &Path) -> Option<PathBuf> {
        self.executables.lock().get(name).cloned()
    }

    async fn run_process(&self, program: &Path, args: &[OsString]) -> io::Result<ProcessOutput> {
        self.invocations
            .lock()
            .push((program.to_path_buf(), args.to_vec()));
        let hang = *self.hang.lock();
        if hang {
            std::future::pending::<()>().await;
        }

        let out_dir = args.iter().find_map(|arg| {
            let arg = arg.to_string_lossy();
            OUT_FLAGS
                .iter()
                .find_map(|flag| arg.strip_prefix(flag).map(PathBuf::from))
        });
        if let Some(out_dir) = out_dir {
            let emitted = self.emitted.lock().clone();
            let mut files = self.files.lock();
            for (relative, contents) in emitted {
                files.insert(out_dir.join(relative), contents);
            }
        }

        Ok(self
            .response
            .lock()
            .clone()
            .unwrap_or_else(|| ProcessOutput::success("", "")))
    }

    async fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.files
            .lock()
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.display().to_string()))
    }
}

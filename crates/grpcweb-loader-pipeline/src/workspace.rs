//! Scratch workspace management

use crate::HostIo;
use grpcweb_loader_core::LoaderResult;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Creates one isolated scratch directory per run
#[derive(Clone)]
pub struct WorkspaceManager {
    io: Arc<dyn HostIo>,
    root: PathBuf,
    prefix: String,
}

impl WorkspaceManager {
    /// Create a manager that places workspaces under `root`
    pub fn new(io: Arc<dyn HostIo>, root: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            io,
            root: root.into(),
            prefix: prefix.into(),
        }
    }

    /// Directory workspaces are created in
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create a fresh, uniquely named workspace
    pub async fn acquire(&self) -> LoaderResult<Workspace> {
        let path = self.io.create_workspace(&self.root, &self.prefix).await?;
        tracing::debug!(workspace = %path.display(), "workspace acquired");
        Ok(Workspace {
            path,
            io: self.io.clone(),
            released: false,
        })
    }
}

/// A scratch directory owned by exactly one run
///
/// Call [`release`](Self::release) on every normal exit path. A workspace
/// dropped without being released (the run's future was cancelled) is
/// removed synchronously from `Drop`.
pub struct Workspace {
    path: PathBuf,
    io: Arc<dyn HostIo>,
    released: bool,
}

impl Workspace {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Recursively remove the workspace directory
    pub async fn release(mut self) -> LoaderResult<()> {
        let result = self.io.remove_workspace(&self.path).await;
        self.released = true;
        result?;
        tracing::debug!(workspace = %self.path.display(), "workspace released");
        Ok(())
    }
}

impl std::fmt::Debug for Workspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workspace")
            .field("path", &self.path)
            .field("released", &self.released)
            .finish()
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        match self.io.remove_workspace_blocking(&self.path) {
            Ok(()) => {
                tracing::debug!(workspace = %self.path.display(), "abandoned workspace removed")
            }
            Err(e) => tracing::warn!(
                workspace = %self.path.display(),
                error = %e,
                "failed to remove abandoned workspace"
            ),
        }
    }
}

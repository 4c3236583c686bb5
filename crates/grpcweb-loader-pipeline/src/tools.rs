//! External tool lookup

use crate::{HostIo, PipelineConfig};
use grpcweb_loader_core::{LoaderError, LoaderResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Absolute locations of the executables a run needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    pub compiler: PathBuf,
    pub plugin: PathBuf,
}

/// Resolves executables on the host search path
#[derive(Clone)]
pub struct ToolLocator {
    io: Arc<dyn HostIo>,
}

impl ToolLocator {
    pub fn new(io: Arc<dyn HostIo>) -> Self {
        Self { io }
    }

    /// Locate a single executable by name or explicit path
    pub async fn locate(&self, name: &Path) -> LoaderResult<PathBuf> {
        match self.io.find_executable(name).await {
            Some(path) => {
                tracing::debug!(tool = %name.display(), path = %path.display(), "tool located");
                Ok(path)
            }
            None => Err(LoaderError::ToolNotFound {
                tool: name.display().to_string(),
            }),
        }
    }

    /// Locate the compiler, then the plugin
    pub async fn locate_all(&self, config: &PipelineConfig) -> LoaderResult<ToolPaths> {
        let compiler = self.locate(&config.compiler).await?;
        let plugin = self.locate(&config.plugin).await?;
        Ok(ToolPaths { compiler, plugin })
    }
}

//! Pipeline configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration shared by every run of a [`Pipeline`](crate::Pipeline)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Compiler executable: a name looked up on `PATH`, or an explicit path
    pub compiler: PathBuf,
    /// Code generation plugin executable: a name or an explicit path
    pub plugin: PathBuf,
    /// Name the plugin is registered under (`--plugin=<name>=<path>`)
    pub plugin_name: String,
    /// Entry point name written into dependency references
    pub entry_point: String,
    /// Prefix for scratch workspace directory names
    pub workspace_prefix: String,
    /// Directory scratch workspaces are created in (None = OS temp dir)
    pub temp_root: Option<PathBuf>,
    /// Upper bound on runs executing at once in a batch
    pub max_concurrent_runs: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            compiler: PathBuf::from("protoc"),
            plugin: PathBuf::from("protoc-gen-js_service"),
            plugin_name: "protoc-gen-js_service".to_string(),
            entry_point: "grpc-web-loader".to_string(),
            workspace_prefix: "grpc-web-loader-".to_string(),
            temp_root: None,
            max_concurrent_runs: 16,
        }
    }
}

impl PipelineConfig {
    /// Create a new pipeline configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific compiler executable
    pub fn with_compiler(mut self, compiler: impl Into<PathBuf>) -> Self {
        self.compiler = compiler.into();
        self
    }

    /// Use a specific plugin executable
    pub fn with_plugin(mut self, plugin: impl Into<PathBuf>) -> Self {
        self.plugin = plugin.into();
        self
    }

    /// Set the entry point name written into dependency references
    pub fn with_entry_point(mut self, entry_point: impl Into<String>) -> Self {
        self.entry_point = entry_point.into();
        self
    }

    /// Create workspaces under a specific directory
    pub fn with_temp_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.temp_root = Some(root.into());
        self
    }

    /// Set the batch concurrency limit
    pub fn with_max_concurrent_runs(mut self, runs: usize) -> Self {
        self.max_concurrent_runs = runs;
        self
    }

    /// Directory workspaces are created in
    pub fn temp_root(&self) -> PathBuf {
        self.temp_root.clone().unwrap_or_else(std::env::temp_dir)
    }
}

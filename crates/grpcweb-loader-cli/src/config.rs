//! Project configuration file (`grpcweb-loader.toml`)

use anyhow::{Context, Result};
use grpcweb_loader_core::{GenerationMode, LoaderOptions, LogLevel};
use grpcweb_loader_pipeline::PipelineConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File looked up in the current directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "grpcweb-loader.toml";

/// grpcweb-loader.toml structure
///
/// ```toml
/// log_level = "info"
///
/// [options]
/// basePath = "schemas"
/// mode = "Service"
///
/// [pipeline]
/// compiler = "/opt/protobuf/bin/protoc"
/// max_concurrent_runs = 8
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub log_level: Option<String>,

    #[serde(default)]
    pub options: Option<LoaderOptions>,

    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl ProjectConfig {
    /// Load configuration from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config: {:?}", path.as_ref()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from string
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config")
    }

    /// Load the explicit config file, or the default one if it exists
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Self::from_file(DEFAULT_CONFIG_FILE),
            None => Ok(Self::default()),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(options) = &self.options {
            options.validate().context("Invalid [options]")?;
        }

        if self.pipeline.compiler.as_os_str().is_empty() {
            anyhow::bail!("Compiler cannot be empty");
        }
        if self.pipeline.plugin.as_os_str().is_empty() {
            anyhow::bail!("Plugin cannot be empty");
        }
        if self.pipeline.plugin_name.is_empty() {
            anyhow::bail!("Plugin name cannot be empty");
        }
        if self.pipeline.entry_point.is_empty() {
            anyhow::bail!("Entry point cannot be empty");
        }
        if self.pipeline.max_concurrent_runs == 0 {
            anyhow::bail!("max_concurrent_runs must be greater than zero");
        }

        self.log_level()?;
        Ok(())
    }

    /// Configured log level (default: info)
    pub fn log_level(&self) -> Result<LogLevel> {
        match &self.log_level {
            Some(level) => level
                .parse()
                .with_context(|| format!("Invalid log_level: {level}")),
            None => Ok(LogLevel::default()),
        }
    }

    /// Options for a run, with command line values taking precedence
    pub fn loader_options(
        &self,
        base_path: Option<PathBuf>,
        mode: Option<GenerationMode>,
    ) -> Result<LoaderOptions> {
        let mut options = match (&self.options, base_path) {
            (Some(options), Some(base_path)) => LoaderOptions {
                base_path,
                ..options.clone()
            },
            (Some(options), None) => options.clone(),
            (None, Some(base_path)) => LoaderOptions::new(base_path),
            (None, None) => anyhow::bail!(
                "No base path: pass --base-path or set [options] basePath in {DEFAULT_CONFIG_FILE}"
            ),
        };
        if let Some(mode) = mode {
            options.mode = mode;
        }
        options.validate()?;
        Ok(options)
    }
}

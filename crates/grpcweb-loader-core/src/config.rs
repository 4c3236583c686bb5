//! Loader options passed by the host to every run

use crate::{GenerationMode, LoaderError, LoaderResult, paths};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Options recognised by the loader
///
/// Serialized in camelCase so that the JSON embedded in dependency references
/// reads `{"basePath":...,"mode":...}`. Keys the loader does not know about
/// are kept in [`extra`](Self::extra) and written back unchanged, after
/// `basePath` and `mode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoaderOptions {
    /// Root import directory handed to the compiler as `--proto_path`
    ///
    /// Kept exactly as the host supplied it; use
    /// [`resolved_base_path`](Self::resolved_base_path) for the absolute form.
    pub base_path: PathBuf,

    /// What to generate (default: message codec)
    ///
    /// `kind` is accepted as an alternative key name.
    #[serde(default, alias = "kind")]
    pub mode: GenerationMode,

    /// Pass-through options the loader does not interpret
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl LoaderOptions {
    /// Create options for a base path with the default mode
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            mode: GenerationMode::default(),
            extra: serde_json::Map::new(),
        }
    }

    /// Copy of these options with the mode replaced
    pub fn with_mode(&self, mode: GenerationMode) -> Self {
        Self {
            mode,
            ..self.clone()
        }
    }

    /// Check the options a run cannot do without
    pub fn validate(&self) -> LoaderResult<()> {
        if self.base_path.as_os_str().is_empty() {
            return Err(LoaderError::InvalidOptions("basePath is required".to_string()));
        }
        Ok(())
    }

    /// The base path made absolute against the current directory
    pub fn resolved_base_path(&self) -> LoaderResult<PathBuf> {
        self.validate()?;
        Ok(paths::absolutize(&self.base_path)?)
    }

    /// Base path as given
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

//! One compilation unit handed to the pipeline

use crate::{GenerationMode, LoaderError, LoaderOptions, LoaderResult};
use std::path::{Path, PathBuf};

/// A request to generate one artifact for one schema file
///
/// Immutable once constructed. The full [`LoaderOptions`] are carried so that
/// pass-through options reach any [`DependencyReference`](crate::DependencyReference)
/// built from this request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    source_path: PathBuf,
    options: LoaderOptions,
}

impl GenerationRequest {
    /// Create a request for an absolute schema file path
    pub fn new(source_path: impl Into<PathBuf>, options: LoaderOptions) -> LoaderResult<Self> {
        let source_path = source_path.into();
        if !source_path.is_absolute() {
            return Err(LoaderError::InvalidOptions(format!(
                "source path must be absolute: {}",
                source_path.display()
            )));
        }
        options.validate()?;
        Ok(Self {
            source_path,
            options,
        })
    }

    /// Schema file to compile
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn options(&self) -> &LoaderOptions {
        &self.options
    }

    pub fn mode(&self) -> GenerationMode {
        self.options.mode
    }

    /// Base path as configured (may be relative)
    pub fn base_path(&self) -> &Path {
        self.options.base_path()
    }

    /// The Message-mode request for the same schema file and options
    pub fn companion(&self) -> Self {
        Self {
            source_path: self.source_path.clone(),
            options: self.options.with_mode(GenerationMode::Message),
        }
    }
}

impl std::fmt::Display for GenerationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.source_path.display(), self.mode())
    }
}

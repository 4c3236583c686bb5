//! Maps a schema file to the generated file's location in a workspace

use grpcweb_loader_core::{GenerationMode, LoaderError, LoaderResult, paths};
use std::path::{Path, PathBuf};

/// Computes generated file names from source paths
///
/// Module paths are `/`-separated on every platform, since they end up
/// embedded in generated code.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputResolver;

impl OutputResolver {
    /// Source path relative to `base_path`, with its last extension removed
    ///
    /// `/proj/schemas` + `/proj/schemas/pkg/greeter.proto` → `pkg/greeter`
    pub fn module_path(base_path: &Path, source: &Path) -> LoaderResult<String> {
        let base = paths::normalize(base_path);
        let source = paths::normalize(source);
        let relative = source.strip_prefix(&base).map_err(|_| {
            LoaderError::InvalidOptions(format!(
                "{} is not under base path {}",
                source.display(),
                base.display()
            ))
        })?;
        if relative.as_os_str().is_empty() {
            return Err(LoaderError::InvalidOptions(format!(
                "source path {} names the base directory itself",
                source.display()
            )));
        }
        Ok(paths::to_slash(&relative.with_extension("")))
    }

    /// File name suffix the compiler uses for each mode
    pub fn artifact_suffix(mode: GenerationMode) -> &'static str {
        match mode {
            GenerationMode::Message => "_pb.js",
            GenerationMode::Service => "_pb_service.js",
        }
    }

    /// Relative path of the generated file for `source` in `mode`
    pub fn resolve(base_path: &Path, source: &Path, mode: GenerationMode) -> LoaderResult<String> {
        let module_path = Self::module_path(base_path, source)?;
        Ok(format!("{module_path}{}", Self::artifact_suffix(mode)))
    }

    /// Absolute location of a resolved file inside `workspace`
    pub fn locate(workspace: &Path, relative: &str) -> PathBuf {
        relative
            .split('/')
            .fold(workspace.to_path_buf(), |path, part| path.join(part))
    }
}

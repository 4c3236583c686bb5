//! Subcommand implementations

pub mod batch;
pub mod check;
pub mod generate;
pub mod resolve;

use anyhow::{Context, Result};
use grpcweb_loader_core::{GenerationRequest, LoaderOptions, paths};
use std::io::Write;
use std::path::Path;

/// Request for `source`, made absolute against the current directory
fn request_for(source: &Path, options: LoaderOptions) -> Result<GenerationRequest> {
    let source = paths::absolutize(source)
        .with_context(|| format!("Failed to resolve source path: {}", source.display()))?;
    Ok(GenerationRequest::new(source, options)?)
}

/// Write an artifact to `output`, or to stdout when no file is given
async fn write_artifact(artifact: &[u8], output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
            tokio::fs::write(path, artifact)
                .await
                .with_context(|| format!("Failed to write artifact: {}", path.display()))?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(artifact)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

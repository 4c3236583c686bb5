//! Generate command implementation

use super::{request_for, write_artifact};
use crate::config::ProjectConfig;
use anyhow::Result;
use grpcweb_loader_core::GenerationMode;
use grpcweb_loader_pipeline::Pipeline;
use std::path::PathBuf;

/// Run the generate command
pub async fn run(
    config: &ProjectConfig,
    source: PathBuf,
    base_path: Option<PathBuf>,
    mode: Option<GenerationMode>,
    output: Option<PathBuf>,
) -> Result<()> {
    let options = config.loader_options(base_path, mode)?;
    let request = request_for(&source, options)?;
    let pipeline = Pipeline::new(config.pipeline.clone());

    let artifact = pipeline.run(&request).await?;
    write_artifact(&artifact, output.as_deref()).await?;

    if let Some(path) = &output {
        eprintln!("✓ {} → {}", request, path.display());
    }
    Ok(())
}

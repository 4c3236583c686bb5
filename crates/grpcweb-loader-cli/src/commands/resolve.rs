//! Resolve command implementation
//!
//! Performs the re-run a host build graph does when it meets a dependency
//! reference in a generated service stub.

use super::write_artifact;
use crate::config::ProjectConfig;
use anyhow::Result;
use grpcweb_loader_pipeline::Pipeline;
use std::path::PathBuf;

/// Run the resolve command
pub async fn run(config: &ProjectConfig, reference: &str, output: Option<PathBuf>) -> Result<()> {
    let pipeline = Pipeline::new(config.pipeline.clone());

    let artifact = pipeline.resolve_reference(reference).await?;
    write_artifact(&artifact, output.as_deref()).await
}

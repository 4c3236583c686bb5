//! Batch command implementation

use super::{request_for, write_artifact};
use crate::config::ProjectConfig;
use anyhow::{Context, Result};
use grpcweb_loader_core::{GenerationMode, LoaderError};
use grpcweb_loader_pipeline::{CancellationToken, CollectingSink, OutputResolver, Pipeline};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Run the batch command
///
/// Every source is generated concurrently; artifacts land under `out_dir` at
/// their module path. Ctrl-C cancels outstanding runs.
pub async fn run(
    config: &ProjectConfig,
    sources: Vec<PathBuf>,
    base_path: Option<PathBuf>,
    mode: Option<GenerationMode>,
    out_dir: &Path,
) -> Result<()> {
    let options = config.loader_options(base_path, mode)?;
    let base = options.resolved_base_path()?;
    let requests = sources
        .iter()
        .map(|source| request_for(source, options.clone()))
        .collect::<Result<Vec<_>>>()?;

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted, cancelling outstanding runs");
            trigger.cancel();
        }
    });

    let diagnostics = Arc::new(CollectingSink::new());
    let pipeline = Pipeline::new(config.pipeline.clone()).with_diagnostics(diagnostics.clone());
    let results = pipeline.run_all_until(requests.clone(), cancel).await;
    ctrl_c.abort();

    let total = results.len();
    let mut first_error: Option<LoaderError> = None;
    let mut failed = 0;
    for (request, result) in requests.iter().zip(results) {
        match result {
            Ok(artifact) => {
                let relative = OutputResolver::resolve(&base, request.source_path(), request.mode())?;
                let target = OutputResolver::locate(out_dir, &relative);
                write_artifact(&artifact, Some(&target)).await?;
                println!("✓ {} → {}", request.source_path().display(), target.display());
            }
            Err(e) => {
                failed += 1;
                println!("✗ {}: {}", request.source_path().display(), e);
                first_error.get_or_insert(e);
            }
        }
    }

    let warnings = diagnostics.warnings();
    for warning in &warnings {
        eprintln!("⚠ {warning}");
    }

    println!(
        "\n{} generated, {} failed, {} warnings",
        total - failed,
        failed,
        warnings.len()
    );

    match first_error {
        Some(e) => Err(e).with_context(|| format!("{failed} of {total} runs failed")),
        None => Ok(()),
    }
}

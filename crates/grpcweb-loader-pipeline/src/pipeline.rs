//! Orchestration of a single generation run

use crate::{
    ArtifactPostProcessor, CancellationToken, CompilerInvoker, DiagnosticSink, HostIo, OutputResolver,
    PipelineConfig, SystemIo, ToolLocator, TracingSink, WorkspaceManager,
};
use grpcweb_loader_core::{
    DependencyReference, GenerationRequest, LoaderError, LoaderResult, RunState, paths,
};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::Instrument;

/// Sole entry point for generating artifacts
///
/// Each call to [`run`](Self::run) gets its own workspace and shares no
/// mutable state with other runs, so a `Pipeline` can be cloned freely and
/// driven from many tasks at once.
#[derive(Clone)]
pub struct Pipeline {
    config: Arc<PipelineConfig>,
    diagnostics: Arc<dyn DiagnosticSink>,
    workspaces: WorkspaceManager,
    tools: ToolLocator,
    invoker: CompilerInvoker,
    postprocessor: ArtifactPostProcessor,
}

impl Pipeline {
    /// Create a pipeline backed by the real filesystem and processes
    pub fn new(config: PipelineConfig) -> Self {
        Self::with_io(config, Arc::new(SystemIo::new()))
    }

    /// Create a pipeline with a custom I/O implementation
    pub fn with_io(config: PipelineConfig, io: Arc<dyn HostIo>) -> Self {
        let workspaces =
            WorkspaceManager::new(io.clone(), config.temp_root(), config.workspace_prefix.clone());
        let tools = ToolLocator::new(io.clone());
        let invoker = CompilerInvoker::new(io.clone(), config.plugin_name.clone());
        let postprocessor = ArtifactPostProcessor::new(io, config.entry_point.clone());
        Self {
            config: Arc::new(config),
            diagnostics: Arc::new(TracingSink),
            workspaces,
            tools,
            invoker,
            postprocessor,
        }
    }

    /// Route compiler warnings to `sink` instead of the log
    pub fn with_diagnostics(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = sink;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Generate the artifact for one request
    ///
    /// Yields exactly one artifact or exactly one error. The workspace is
    /// removed before this returns, whatever the outcome.
    pub async fn run(&self, request: &GenerationRequest) -> LoaderResult<Vec<u8>> {
        let span = tracing::info_span!(
            "generate",
            source = %request.source_path().display(),
            mode = %request.mode()
        );
        self.run_in_workspace(request).instrument(span).await
    }

    /// Decode a dependency reference and run the companion request it names
    pub async fn resolve_reference(&self, literal: &str) -> LoaderResult<Vec<u8>> {
        let reference = DependencyReference::parse(literal)?;
        if reference.entry_point() != self.config.entry_point {
            return Err(LoaderError::InvalidReference(format!(
                "reference targets entry point {:?}, this pipeline is {:?}",
                reference.entry_point(),
                self.config.entry_point
            )));
        }
        let request = reference.into_request()?;
        self.run(&request).await
    }

    /// Run every request concurrently, returning results in request order
    ///
    /// At most [`max_concurrent_runs`](PipelineConfig::max_concurrent_runs)
    /// runs execute at once.
    pub async fn run_all(&self, requests: Vec<GenerationRequest>) -> Vec<LoaderResult<Vec<u8>>> {
        self.run_batch(requests, None).await
    }

    /// Like [`run_all`](Self::run_all), but stops outstanding runs once
    /// `cancel` is cancelled
    ///
    /// Stopped runs yield [`LoaderError::Cancelled`]; their child processes
    /// are killed and their workspaces removed.
    pub async fn run_all_until(
        &self,
        requests: Vec<GenerationRequest>,
        cancel: CancellationToken,
    ) -> Vec<LoaderResult<Vec<u8>>> {
        self.run_batch(requests, Some(cancel)).await
    }

    async fn run_batch(
        &self,
        requests: Vec<GenerationRequest>,
        cancel: Option<CancellationToken>,
    ) -> Vec<LoaderResult<Vec<u8>>> {
        let count = requests.len();
        let permits = Arc::new(Semaphore::new(self.config.max_concurrent_runs.max(1)));
        let mut tasks = JoinSet::new();

        for (index, request) in requests.into_iter().enumerate() {
            let pipeline = self.clone();
            let permits = permits.clone();
            let cancel = cancel.clone();
            tasks.spawn(async move {
                let run = async {
                    let _permit = permits
                        .acquire_owned()
                        .await
                        .map_err(|e| LoaderError::Runtime(e.to_string()))?;
                    pipeline.run(&request).await
                };
                let result = match cancel {
                    Some(cancel) => tokio::select! {
                        biased;
                        _ = cancel.cancelled() => Err(LoaderError::Cancelled),
                        result = run => result,
                    },
                    None => run.await,
                };
                (index, result)
            });
        }

        let mut results: Vec<Option<LoaderResult<Vec<u8>>>> = (0..count).map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, result)) => results[index] = Some(result),
                Err(e) => tracing::warn!(error = %e, "generation task did not finish"),
            }
        }
        results
            .into_iter()
            .map(|result| {
                result.unwrap_or_else(|| {
                    Err(LoaderError::Runtime("generation task did not finish".to_string()))
                })
            })
            .collect()
    }

    async fn run_in_workspace(&self, request: &GenerationRequest) -> LoaderResult<Vec<u8>> {
        tracing::info!("generation started");
        let mut tracker = RunTracker::new();

        let workspace = match self.workspaces.acquire().await {
            Ok(workspace) => workspace,
            Err(e) => {
                tracker.fail();
                return Err(e);
            }
        };
        tracker.advance(RunState::WorkspaceAcquired)?;

        let outcome = self.generate(request, workspace.path(), &mut tracker).await;
        let released = workspace.release().await;

        match (outcome, released) {
            (Ok(artifact), Ok(())) => {
                tracker.advance(RunState::Completed)?;
                tracing::info!(bytes = artifact.len(), "generation finished");
                Ok(artifact)
            }
            (Ok(_), Err(release_error)) => {
                tracker.fail();
                Err(release_error)
            }
            (Err(e), Ok(())) => {
                tracker.fail();
                Err(e)
            }
            (Err(e), Err(release_error)) => {
                tracing::warn!(error = %release_error, "failed to remove workspace");
                tracker.fail();
                Err(e)
            }
        }
    }

    async fn generate(
        &self,
        request: &GenerationRequest,
        workspace: &Path,
        tracker: &mut RunTracker,
    ) -> LoaderResult<Vec<u8>> {
        let base_path = request.options().resolved_base_path()?;
        let source = paths::normalize(request.source_path());

        let tools = self.tools.locate_all(&self.config).await?;
        tracker.advance(RunState::ToolsResolved)?;

        let result = self
            .invoker
            .invoke(&tools, &source, &base_path, workspace, request.mode())
            .await?;
        if let Some(warning) = result.warning(request.source_path()) {
            self.diagnostics.warning(&warning);
        }
        tracker.advance(RunState::Invoked)?;

        let module_path = OutputResolver::module_path(&base_path, &source)?;
        let relative = format!("{module_path}{}", OutputResolver::artifact_suffix(request.mode()));
        let artifact = OutputResolver::locate(workspace, &relative);
        tracker.advance(RunState::Resolved)?;

        let output = self
            .postprocessor
            .process(request, &artifact, &module_path)
            .await?;
        tracker.advance(RunState::PostProcessed)?;
        Ok(output)
    }
}

/// Records the state transitions of one run
struct RunTracker {
    state: RunState,
}

impl RunTracker {
    fn new() -> Self {
        Self {
            state: RunState::Idle,
        }
    }

    fn advance(&mut self, target: RunState) -> LoaderResult<()> {
        if !self.state.can_transition_to(target) {
            return Err(LoaderError::InvalidState {
                expected: format!("a state reachable from {}", self.state),
                actual: target.to_string(),
            });
        }
        tracing::debug!(from = %self.state, to = %target, "run state");
        self.state = target;
        Ok(())
    }

    fn fail(&mut self) {
        if !self.state.is_terminal() {
            tracing::debug!(from = %self.state, to = %RunState::Failed, "run state");
            self.state = RunState::Failed;
        }
    }
}

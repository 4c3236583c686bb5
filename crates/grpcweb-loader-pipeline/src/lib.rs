//! grpcweb-loader-pipeline - Compiler invocation and artifact rewriting
//!
//! This crate provides:
//! - [`Pipeline`], the single entry point for one generation run
//! - The components it sequences: [`WorkspaceManager`], [`ToolLocator`],
//!   [`CompilerInvoker`], [`OutputResolver`], [`ArtifactPostProcessor`]
//! - [`HostIo`], the injected capability through which every component touches
//!   the filesystem, the search path, and child processes
//! - [`DiagnosticSink`] for non-fatal compiler output
//! - Batches of concurrent runs, optionally stopped through a [`CancellationToken`]
//!
//! # Example
//!
//! ```no_run
//! use grpcweb_loader_core::{GenerationMode, GenerationRequest, LoaderOptions};
//! use grpcweb_loader_pipeline::{Pipeline, PipelineConfig};
//!
//! # async fn demo() -> grpcweb_loader_core::LoaderResult<()> {
//! let pipeline = Pipeline::new(PipelineConfig::default());
//! let options = LoaderOptions::new("/proj/schemas").with_mode(GenerationMode::Service);
//! let request = GenerationRequest::new("/proj/schemas/greeter.proto", options)?;
//!
//! let artifact = pipeline.run(&request).await?;
//! # let _ = artifact;
//! # Ok(())
//! # }
//! ```

mod config;
mod diagnostics;
mod invoker;
mod io;
mod pipeline;
mod postprocess;
mod resolver;
#[cfg(test)]
mod testing;
mod tools;
mod workspace;

pub use config::PipelineConfig;
pub use diagnostics::{CollectingSink, DiagnosticSink, TracingSink};
pub use invoker::{CompilerInvoker, CompilerResult};
pub use io::{HostIo, ProcessOutput, SystemIo};
pub use pipeline::Pipeline;
pub use postprocess::ArtifactPostProcessor;
pub use resolver::OutputResolver;
pub use tools::{ToolLocator, ToolPaths};
pub use tokio_util::sync::CancellationToken;
pub use workspace::{Workspace, WorkspaceManager};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        CancellationToken, DiagnosticSink, HostIo, Pipeline, PipelineConfig, SystemIo,
    };
}

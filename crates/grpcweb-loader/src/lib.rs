//! # grpcweb-loader
//!
//! Build-time code generation for grpc-web. Given a `.proto` schema file, the
//! loader runs `protoc` with the `protoc-gen-js_service` plugin in a scratch
//! workspace and returns the generated module:
//! - **Message mode** returns the message codec (`<name>_pb.js`) verbatim
//! - **Service mode** returns the service stub (`<name>_pb_service.js`) with its
//!   import of the sibling codec redirected to a dependency reference, which the
//!   host resolves by running the loader again in Message mode
//!
//! ## Quick Start
//!
//! ```no_run
//! use grpcweb_loader::prelude::*;
//!
//! # async fn demo() -> LoaderResult<()> {
//! let pipeline = Pipeline::new(PipelineConfig::default());
//!
//! let options = LoaderOptions::new("/proj/schemas").with_mode(GenerationMode::Service);
//! let request = GenerationRequest::new("/proj/schemas/greeter.proto", options)?;
//! let stub = pipeline.run(&request).await?;
//!
//! // The stub requires its codec through a reference like
//! // ["grpc-web-loader",{"basePath":"/proj/schemas","mode":"Message"},"/proj/schemas/greeter.proto"]
//! let reference = DependencyReference::companion("grpc-web-loader", &request).to_literal()?;
//! let codec = pipeline.resolve_reference(&reference).await?;
//! # let _ = (stub, codec);
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing hosts
//!
//! Every filesystem, search-path and process access goes through [`HostIo`].
//! Implement it (with [`async_trait`]) and pass it to [`Pipeline::with_io`] to
//! run the pipeline without a real compiler.
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports from:
//! - [`grpcweb_loader_core`] - Requests, options, dependency references, errors
//! - [`grpcweb_loader_pipeline`] - The pipeline and its components
//! - [`grpcweb_loader_logging`] - Tracing subscriber setup

// Re-export core types
pub use grpcweb_loader_core::{
    CompileWarning, DependencyReference, GenerationMode, GenerationRequest, LoaderError,
    LoaderOptions, LoaderResult, LogLevel, RunState, paths,
};

// Re-export pipeline types
pub use grpcweb_loader_pipeline::{
    ArtifactPostProcessor, CancellationToken, CollectingSink, CompilerInvoker, CompilerResult,
    DiagnosticSink, HostIo, OutputResolver, Pipeline, PipelineConfig, ProcessOutput, SystemIo,
    ToolLocator, ToolPaths, TracingSink, Workspace, WorkspaceManager,
};

// Re-export logging
pub use grpcweb_loader_logging::{ReloadHandle, init_logging};

// Re-export common dependencies that hosts need
pub use async_trait::async_trait;
pub use tokio;
pub use tracing;

/// Prelude module for convenient imports.
///
/// Use `use grpcweb_loader::prelude::*;` to import commonly used types.
///
/// This includes:
/// - Requests: `GenerationRequest`, `GenerationMode`, `LoaderOptions`
/// - Results: `LoaderError`, `LoaderResult`, `CompileWarning`
/// - Pipeline: `Pipeline`, `PipelineConfig`, `HostIo`, `DiagnosticSink`
/// - Common deps: `async_trait`
pub mod prelude {
    pub use crate::{
        CancellationToken, CompileWarning, DependencyReference, DiagnosticSink, GenerationMode,
        GenerationRequest, HostIo, LoaderError, LoaderOptions, LoaderResult, LogLevel, Pipeline,
        PipelineConfig, ProcessOutput, async_trait,
    };
}

//! Dependency references between generated artifacts
//!
//! A service stub needs the message codec generated from the same schema
//! file. Rather than generating both in one compiler run, the stub is
//! rewritten to point at a *dependency reference*: a JSON literal that the
//! host build graph resolves by running the pipeline again.
//!
//! # Wire format
//!
//! ```text
//! ["grpc-web-loader",{"basePath":"/proj/schemas","mode":"Message"},"/proj/schemas/greeter.proto"]
//!  └─ entry point ─┘ └────────────── options ────────────────┘ └────────── source path ─────┘
//! ```
//!
//! The embedded options always carry `mode: "Message"`, so resolving a
//! reference can never recurse into another service run.

use crate::{GenerationMode, GenerationRequest, LoaderError, LoaderOptions, LoaderResult};
use std::path::{Path, PathBuf};

/// Instruction for the host to re-run the pipeline for a companion artifact
#[derive(Debug, Clone, PartialEq)]
pub struct DependencyReference {
    entry_point: String,
    options: LoaderOptions,
    source_path: PathBuf,
}

impl DependencyReference {
    /// Reference to the Message-mode companion of `request`
    pub fn companion(entry_point: impl Into<String>, request: &GenerationRequest) -> Self {
        let companion = request.companion();
        Self {
            entry_point: entry_point.into(),
            options: companion.options().clone(),
            source_path: companion.source_path().to_path_buf(),
        }
    }

    /// Name of the pipeline entry point the host should route through
    pub fn entry_point(&self) -> &str {
        &self.entry_point
    }

    pub fn options(&self) -> &LoaderOptions {
        &self.options
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Serialize to the JSON array literal embedded in generated code
    pub fn to_literal(&self) -> LoaderResult<String> {
        let literal = serde_json::to_string(&(&self.entry_point, &self.options, &self.source_path))?;
        Ok(literal)
    }

    /// Decode a literal produced by [`to_literal`](Self::to_literal)
    pub fn parse(literal: &str) -> LoaderResult<Self> {
        let (entry_point, options, source_path): (String, LoaderOptions, PathBuf) =
            serde_json::from_str(literal.trim())
                .map_err(|e| LoaderError::InvalidReference(e.to_string()))?;

        if entry_point.is_empty() {
            return Err(LoaderError::InvalidReference(
                "entry point name is empty".to_string(),
            ));
        }
        if options.mode != GenerationMode::Message {
            return Err(LoaderError::InvalidReference(format!(
                "companion references must request Message mode, got {}",
                options.mode
            )));
        }
        options
            .validate()
            .map_err(|e| LoaderError::InvalidReference(e.to_string()))?;

        Ok(Self {
            entry_point,
            options,
            source_path,
        })
    }

    /// The request the host should run to resolve this reference
    pub fn into_request(self) -> LoaderResult<GenerationRequest> {
        GenerationRequest::new(self.source_path, self.options)
    }
}

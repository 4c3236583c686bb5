//! Mode-specific handling of generated artifacts
//!
//! Message artifacts are returned untouched. Service stubs import their
//! sibling message module by relative path, e.g. `require("./greeter_pb")`.
//! That module is never generated alongside the stub, so the import is
//! redirected to a [`DependencyReference`] the host resolves by running the
//! pipeline again in Message mode, and the companion's exports are merged
//! into the stub's own.

use crate::HostIo;
use grpcweb_loader_core::{
    DependencyReference, GenerationMode, GenerationRequest, LoaderError, LoaderResult,
};
use std::path::Path;
use std::sync::Arc;

/// Reads and rewrites generated artifacts
#[derive(Clone)]
pub struct ArtifactPostProcessor {
    io: Arc<dyn HostIo>,
    entry_point: String,
}

impl ArtifactPostProcessor {
    pub fn new(io: Arc<dyn HostIo>, entry_point: impl Into<String>) -> Self {
        Self {
            io,
            entry_point: entry_point.into(),
        }
    }

    /// Read the generated file at `artifact` and apply the mode's transformation
    pub async fn process(
        &self,
        request: &GenerationRequest,
        artifact: &Path,
        module_path: &str,
    ) -> LoaderResult<Vec<u8>> {
        let bytes = self.io.read_file(artifact).await?;
        match request.mode() {
            GenerationMode::Message => Ok(bytes),
            GenerationMode::Service => {
                let text = String::from_utf8(bytes).map_err(|e| {
                    LoaderError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
                })?;
                let reference = DependencyReference::companion(&self.entry_point, request);
                let rewritten = Self::rewrite_service_stub(&text, module_path, &reference.to_literal()?)?;
                Ok(rewritten.into_bytes())
            }
        }
    }

    /// The quoted import of the sibling message module as the compiler writes it
    ///
    /// `greeter` → `"./greeter_pb"`, `pkg/v1/greeter` → `"../../pkg/v1/greeter_pb"`
    pub fn sibling_literal(module_path: &str) -> String {
        let depth = module_path.matches('/').count();
        let up = if depth == 0 {
            "./".to_string()
        } else {
            "../".repeat(depth)
        };
        format!("\"{up}{module_path}_pb\"")
    }

    /// Statement merging the companion's exports under the stub's own
    pub fn merge_statement(reference: &str) -> String {
        format!(
            "Object.assign(module.exports, Object.assign({{}}, require({reference}), module.exports));\n"
        )
    }

    /// Replace the sibling import with `reference` and append the merge statement
    ///
    /// Fails with [`LoaderError::Rewrite`] unless the sibling literal occurs
    /// exactly once.
    pub fn rewrite_service_stub(text: &str, module_path: &str, reference: &str) -> LoaderResult<String> {
        let literal = Self::sibling_literal(module_path);
        let matches = text.matches(literal.as_str()).count();
        if matches != 1 {
            return Err(LoaderError::Rewrite { literal, matches });
        }

        let mut rewritten = text.replacen(literal.as_str(), reference, 1);
        if !rewritten.ends_with('\n') {
            rewritten.push('\n');
        }
        rewritten.push_str(&Self::merge_statement(reference));
        Ok(rewritten)
    }
}

//! Compiler invocation

use crate::{HostIo, ToolPaths};
use grpcweb_loader_core::{CompileWarning, GenerationMode, LoaderError, LoaderResult};
use std::ffi::OsString;
use std::path::Path;
use std::sync::Arc;

/// Decoded output of a successful compiler run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilerResult {
    pub stdout: String,
    pub stderr: String,
}

impl CompilerResult {
    /// Non-fatal diagnostic for `source`, if the compiler wrote anything to stderr
    pub fn warning(&self, source: &Path) -> Option<CompileWarning> {
        if self.stderr.is_empty() {
            None
        } else {
            Some(CompileWarning::new(source, self.stderr.clone()))
        }
    }
}

/// Builds compiler command lines and runs them
#[derive(Clone)]
pub struct CompilerInvoker {
    io: Arc<dyn HostIo>,
    plugin_name: String,
}

impl CompilerInvoker {
    pub fn new(io: Arc<dyn HostIo>, plugin_name: impl Into<String>) -> Self {
        Self {
            io,
            plugin_name: plugin_name.into(),
        }
    }

    /// Argument vector for one compiler run
    ///
    /// ```text
    /// --plugin=<plugin_name>=<plugin>
    /// --proto_path=<base_path>
    /// --js_out=import_style=commonjs,binary:<workspace>   (Message)
    /// --js_service_out=<workspace>                        (Service)
    /// <source>
    /// ```
    pub fn arguments(
        &self,
        plugin: &Path,
        source: &Path,
        base_path: &Path,
        workspace: &Path,
        mode: GenerationMode,
    ) -> Vec<OsString> {
        let mut plugin_flag = OsString::from(format!("--plugin={}=", self.plugin_name));
        plugin_flag.push(plugin.as_os_str());

        let mut import_flag = OsString::from("--proto_path=");
        import_flag.push(base_path.as_os_str());

        let mut output_flag = OsString::from(match mode {
            GenerationMode::Message => "--js_out=import_style=commonjs,binary:",
            GenerationMode::Service => "--js_service_out=",
        });
        output_flag.push(workspace.as_os_str());

        vec![
            plugin_flag,
            import_flag,
            output_flag,
            source.as_os_str().to_os_string(),
        ]
    }

    /// Run the compiler against `source`, writing into `workspace`
    ///
    /// A non-zero exit fails with [`LoaderError::Compile`] carrying stderr.
    pub async fn invoke(
        &self,
        tools: &ToolPaths,
        source: &Path,
        base_path: &Path,
        workspace: &Path,
        mode: GenerationMode,
    ) -> LoaderResult<CompilerResult> {
        let args = self.arguments(&tools.plugin, source, base_path, workspace, mode);
        tracing::debug!(compiler = %tools.compiler.display(), ?args, "invoking compiler");

        let output = self.io.run_process(&tools.compiler, &args).await?;
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.success {
            return Err(LoaderError::Compile {
                status: output.status,
                stderr,
            });
        }
        Ok(CompilerResult { stdout, stderr })
    }
}

//! Delivery of non-fatal compiler diagnostics

use grpcweb_loader_core::CompileWarning;
use parking_lot::Mutex;

/// Receives compiler warnings; never fails the run
pub trait DiagnosticSink: Send + Sync + 'static {
    fn warning(&self, warning: &CompileWarning);
}

/// Forwards warnings to `tracing` at `warn` level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn warning(&self, warning: &CompileWarning) {
        tracing::warn!(
            source = %warning.source_path.display(),
            "compiler warning: {}",
            warning.message.trim_end()
        );
    }
}

/// Keeps warnings in memory for the host to inspect
#[derive(Debug, Default)]
pub struct CollectingSink {
    warnings: Mutex<Vec<CompileWarning>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the warnings received so far
    pub fn warnings(&self) -> Vec<CompileWarning> {
        self.warnings.lock().clone()
    }
}

impl DiagnosticSink for CollectingSink {
    fn warning(&self, warning: &CompileWarning) {
        self.warnings.lock().push(warning.clone());
    }
}

//! Error types for generation runs

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for loader operations
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Error type for a single generation run
///
/// Every variant is fatal to the run that produced it. Non-fatal compiler
/// output travels separately as a [`CompileWarning`].
#[derive(Error, Debug)]
pub enum LoaderError {
    /// A required executable is not on the search path
    #[error("required tool not found: {tool}")]
    ToolNotFound { tool: String },

    /// The compiler exited with a non-zero status
    #[error("compilation failed ({}): {stderr}", describe_status(.status))]
    Compile { status: Option<i32>, stderr: String },

    /// Workspace creation/removal or artifact read failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The sibling-module literal was not found exactly once in the service stub
    #[error("expected exactly one occurrence of {literal} in generated service stub, found {matches}")]
    Rewrite { literal: String, matches: usize },

    /// Options or request are malformed
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// A dependency reference could not be decoded
    #[error("invalid dependency reference: {0}")]
    InvalidReference(String),

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Run state machine was driven out of order
    #[error("invalid run state: expected {expected}, got {actual}")]
    InvalidState { expected: String, actual: String },

    /// Async runtime error (task join, semaphore closed)
    #[error("runtime error: {0}")]
    Runtime(String),

    /// Run was cancelled before it produced a result
    #[error("run cancelled")]
    Cancelled,
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}

impl LoaderError {
    /// Returns a stable numeric code, used by hosts as a process exit status
    pub fn error_code(&self) -> u32 {
        match self {
            LoaderError::ToolNotFound { .. } => 1,
            LoaderError::Compile { .. } => 2,
            LoaderError::Io(_) => 3,
            LoaderError::Rewrite { .. } => 4,
            LoaderError::InvalidOptions(_) => 5,
            LoaderError::InvalidReference(_) => 6,
            LoaderError::Serialization(_) => 7,
            LoaderError::InvalidState { .. } => 8,
            LoaderError::Runtime(_) => 9,
            LoaderError::Cancelled => 10,
        }
    }
}

impl From<serde_json::Error> for LoaderError {
    fn from(err: serde_json::Error) -> Self {
        LoaderError::Serialization(err.to_string())
    }
}

/// Non-fatal compiler output: zero exit status with something on stderr
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileWarning {
    /// Schema file the compiler was run against
    pub source_path: PathBuf,
    /// Captured stderr text
    pub message: String,
}

impl CompileWarning {
    pub fn new(source_path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            source_path: source_path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for CompileWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.source_path.display(),
            self.message.trim_end()
        )
    }
}

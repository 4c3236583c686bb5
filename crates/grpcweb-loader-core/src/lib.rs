//! grpcweb-loader-core - Core types, options, and error taxonomy
//!
//! This crate provides the foundational types shared by the generation pipeline
//! and its hosts:
//! - [`GenerationRequest`] and [`GenerationMode`] describing one compilation unit
//! - [`LoaderOptions`] for the options a host passes to every run
//! - [`DependencyReference`] for the companion-artifact protocol
//! - [`LoaderError`] for error handling
//! - [`RunState`] for tracking a single pipeline run

mod config;
mod error;
mod lifecycle;
mod mode;
pub mod paths;
mod reference;
mod request;

pub use config::LoaderOptions;
pub use error::{CompileWarning, LoaderError, LoaderResult};
pub use lifecycle::RunState;
pub use mode::GenerationMode;
pub use reference::DependencyReference;
pub use request::GenerationRequest;

/// Log levels understood by hosts and the logging crate
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    #[default]
    Info = 2,
    Warn = 3,
    Error = 4,
    Off = 5,
}

impl LogLevel {
    /// Lowercase name, as accepted by `RUST_LOG` style filters
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = LoaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "off" | "none" => Ok(LogLevel::Off),
            other => Err(LoaderError::InvalidOptions(format!(
                "unknown log level: {other}"
            ))),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Off => write!(f, "OFF"),
        }
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        CompileWarning, DependencyReference, GenerationMode, GenerationRequest, LoaderError,
        LoaderOptions, LoaderResult, LogLevel, RunState,
    };
}

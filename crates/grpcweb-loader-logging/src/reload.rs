//! Runtime control of the installed level filter

use grpcweb_loader_core::{LoaderError, LoaderResult, LogLevel};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{Registry, reload};

/// Handle to the level filter of the subscriber installed by
/// [`init_logging`](crate::init_logging)
#[derive(Clone)]
pub struct ReloadHandle {
    filter: reload::Handle<LevelFilter, Registry>,
    env_override: bool,
}

impl ReloadHandle {
    pub(crate) fn new(filter: reload::Handle<LevelFilter, Registry>, env_override: bool) -> Self {
        Self {
            filter,
            env_override,
        }
    }

    /// Switch the subscriber to `level`
    ///
    /// A no-op while `RUST_LOG` is in effect.
    pub fn reload_level(&self, level: LogLevel) -> LoaderResult<()> {
        if self.env_override {
            tracing::debug!(%level, "RUST_LOG is set, ignoring configured level");
            return Ok(());
        }
        self.filter
            .modify(|filter| *filter = level_filter(level))
            .map_err(|e| LoaderError::Runtime(format!("failed to reload log filter: {e}")))
    }
}

/// Convert a [`LogLevel`] to a tracing [`LevelFilter`]
pub fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Trace => LevelFilter::TRACE,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Off => LevelFilter::OFF,
    }
}

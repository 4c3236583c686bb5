//! Subscriber installation

use crate::reload::{ReloadHandle, level_filter};
use grpcweb_loader_core::LogLevel;
use tracing::Subscriber;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::prelude::*;
use tracing_subscriber::reload;

/// Install the global subscriber: formatted output on stderr, filtered at `level`
///
/// When `RUST_LOG` holds valid directives it takes over filtering and `level`
/// is ignored. Returns `None` if a global subscriber was already installed.
pub fn init_logging(level: LogLevel) -> Option<ReloadHandle> {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|directives| EnvFilter::try_new(directives).ok());
    let (subscriber, handle) = build_subscriber(level, env_filter);

    tracing::subscriber::set_global_default(subscriber)
        .ok()
        .map(|()| handle)
}

fn build_subscriber(
    level: LogLevel,
    env_filter: Option<EnvFilter>,
) -> (impl Subscriber + Send + Sync + 'static, ReloadHandle) {
    let env_override = env_filter.is_some();
    let initial = if env_override {
        LevelFilter::TRACE
    } else {
        level_filter(level)
    };

    let (filter, handle) = reload::Layer::new(initial);
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        );
    (subscriber, ReloadHandle::new(handle, env_override))
}

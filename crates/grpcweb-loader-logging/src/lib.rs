//! grpcweb-loader-logging - Tracing subscriber setup
//!
//! This crate provides:
//! - [`init_logging`] installing a stderr subscriber with a reloadable level
//! - [`ReloadHandle`] for changing that level once the host has read its
//!   configuration

mod layer;
mod reload;

pub use grpcweb_loader_core::LogLevel;
pub use layer::init_logging;
pub use reload::{ReloadHandle, level_filter};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{LogLevel, ReloadHandle, init_logging};
}

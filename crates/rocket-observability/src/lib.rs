//! Logging setup and notice sinks for RocketCart.
//!
//! This crate provides:
//! - `LoggingConfig` - level and format, loadable from config files
//! - `init_logging` - installs the global `tracing` subscriber
//! - `LogNotifier` - a `Notifier` that turns notices into log events

mod logging;
mod notice;

pub use logging::*;
pub use notice::*;

//! Logger setup for the benchmark binaries.
//!
//! Events go to stderr so stdout carries nothing but the report.

use std::io;

pub use tracing_subscriber::filter::LevelFilter;

/// Installs the global `fmt` subscriber; events more verbose than `level` are dropped.
pub fn setup_system_logger(level: LevelFilter) {
    tracing_subscriber::fmt().with_writer(io::stderr).with_max_level(level).with_target(false).init();
}

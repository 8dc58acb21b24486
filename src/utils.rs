//! Utility functions shared by the stages and binaries.
//!

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Read an entire byte buffer into a [`String`].
///
/// Returns an error if the buffer contains invalid UTF-8.
pub fn string_from_bytes(buf: Vec<u8>) -> Result<String> {
    Ok(String::from_utf8(buf)?)
}

/// Installs the global `tracing` subscriber.
///
/// Everything goes to stderr: stdout carries job records. The filter comes
/// from `RUST_LOG` and defaults to `info`.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .try_init();
}

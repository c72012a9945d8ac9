//! Tracing/logging setup shared by QwenHT binaries.

/// Initialize process-wide logging with JSON output at `info`.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init_with(tracing::LogFormat::Json, "info");
}

/// Tracing configuration (filters, formatters).
pub mod tracing;

pub use tracing::{LogFormat, init_with};

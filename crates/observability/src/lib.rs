//! Tracing/logging setup shared by embedding processes.
//!
//! The engine crates only *emit* `tracing` events; wiring a subscriber is the
//! host process's job, and this is the one place that does it.

pub mod tracing;

/// Initialize process-wide observability (tracing/logging).
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

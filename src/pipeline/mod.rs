//! The three top-level operations.

/// Synchronous detect-map-fill stages.
pub mod render;
/// Async entry points and dispatch.
pub mod session;

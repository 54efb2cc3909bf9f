//! Shared value types, errors, settings and pixel arithmetic.

/// Image, point and rectangle value types.
pub mod core;
/// Error type and machine-readable failure kinds.
pub mod error;
pub(crate) mod math;
/// Pipeline tunables and their config/env sources.
pub mod settings;

//! Preparing the detector input.

/// Aspect-preserving fit of the source into the detector box.
pub mod resize;

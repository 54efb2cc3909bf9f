//! Coordinate conversion from detector space to image pixels.

/// Face-local landmarks to original-image pixels.
pub mod mapping;

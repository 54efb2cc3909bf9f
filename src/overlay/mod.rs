//! Everything that changes pixels: geometry, fills, grayscale.

/// Translucent fills composited over a base image.
pub mod composite;
/// Lip polygons and smoothed eyebrow curves.
pub mod geometry;
/// Luma conversion.
pub mod grayscale;

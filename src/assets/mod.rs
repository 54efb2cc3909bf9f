//! Getting pixels and colors in: image references, decoding, hex parsing.

/// Overlay colors and hex parsing.
pub mod color;
/// Encoded bytes to RGBA8.
pub mod decode;
/// Image references to decoded images.
pub mod loader;

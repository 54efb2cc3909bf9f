//! Face records and the detection capability that produces them.

/// Face bounding boxes and named landmark groups.
pub mod face;
/// Detector trait and the replaying implementation.
pub mod oracle;

//! Artifact encoding and storage.
//!
//! Every successful operation produces exactly one new artifact and never
//! touches its source.

/// JPEG encoding and the temp-directory writer.
pub mod writer;

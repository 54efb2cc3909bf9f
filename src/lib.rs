//! Facetint recolors facial features in still images.
//!
//! Three operations are exposed, each producing one new JPEG artifact and
//! leaving its source untouched:
//!
//! - [`FacePipeline::convert_to_grayscale`]
//! - [`FacePipeline::add_lip_color`]
//! - [`FacePipeline::recolor_eyebrows`]
//!
//! Detection is delegated to a [`LandmarkOracle`]. Landmarks come back
//! normalized to the face bounding box and are mapped to original-image pixels
//! before translucent fills are composited over a copy of the source.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Downscaling for detection.
pub mod analysis;
/// Image loading and color parsing.
pub mod assets;
/// Face records and detectors.
pub mod detect;
/// Artifact encoding and storage.
pub mod encode;
/// Value types, errors and settings.
pub mod foundation;
/// Overlay geometry and compositing.
pub mod overlay;
/// Top-level operations.
pub mod pipeline;
/// Landmark coordinate mapping.
pub mod transform;

pub use crate::assets::color::{OverlayColor, parse_hex_color};
pub use crate::assets::loader::{FsImageLoader, ImageLoader};
pub use crate::detect::face::{FaceRecord, LandmarkRegion};
pub use crate::detect::oracle::{LandmarkOracle, StaticLandmarkOracle};
pub use crate::encode::writer::{ArtifactWriter, OutputReference, TempDirWriter};
pub use crate::foundation::core::{
    ImageSize, MappedPoint, NormalizedPoint, NormalizedRect, PixelImage, ScaleFactors,
};
pub use crate::foundation::error::{ErrorKind, FacetintError, FacetintResult, FailureReport};
pub use crate::foundation::settings::PipelineSettings;
pub use crate::pipeline::session::{FacePipeline, Operation, OperationHandle};

use std::path::Path;

use crate::{
    detect::face::FaceRecord,
    foundation::{
        core::PixelImage,
        error::{FacetintError, FacetintResult},
    },
};

/// Face/landmark detection capability.
///
/// Implementations receive the analysis-resolution image and report faces in
/// their own order; callers only ever use the first one.
pub trait LandmarkOracle: Send + Sync {
    /// Every face found in `image`. An empty list means no face.
    fn detect_faces(&self, image: &PixelImage) -> FacetintResult<Vec<FaceRecord>>;

    /// The primary (first reported) face, if any.
    fn detect(&self, image: &PixelImage) -> FacetintResult<Option<FaceRecord>> {
        let faces = self.detect_faces(image)?;
        tracing::debug!(faces = faces.len(), "landmark detection finished");
        Ok(faces.into_iter().next())
    }
}

/// Replays a fixed list of faces for every image.
///
/// Used as the detector backend when landmarks were produced ahead of time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StaticLandmarkOracle {
    faces: Vec<FaceRecord>,
}

impl StaticLandmarkOracle {
    /// Oracle that reports `faces` in the given order.
    pub fn new(faces: Vec<FaceRecord>) -> Self {
        Self { faces }
    }

    /// Oracle that never finds a face.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a JSON array of face records (or a single record).
    pub fn from_json_str(json: &str) -> FacetintResult<Self> {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Many(Vec<FaceRecord>),
            One(FaceRecord),
        }

        let faces = match serde_json::from_str::<Repr>(json)
            .map_err(|e| FacetintError::validation(format!("parse landmark JSON: {e}")))?
        {
            Repr::Many(v) => v,
            Repr::One(f) => vec![f],
        };
        Ok(Self::new(faces))
    }

    /// Read [`Self::from_json_str`] input from a file.
    pub fn from_json_path(path: &Path) -> FacetintResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            FacetintError::validation(format!("read landmarks '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&json)
    }

    /// Faces this oracle reports.
    pub fn faces(&self) -> &[FaceRecord] {
        &self.faces
    }
}

impl LandmarkOracle for StaticLandmarkOracle {
    fn detect_faces(&self, _image: &PixelImage) -> FacetintResult<Vec<FaceRecord>> {
        Ok(self.faces.clone())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/detect/oracle.rs"]
mod tests;

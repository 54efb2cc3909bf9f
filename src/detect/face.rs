use std::collections::BTreeMap;

use crate::foundation::core::{NormalizedPoint, NormalizedRect};

/// Named landmark group reported by a detector.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum LandmarkRegion {
    /// Outer lip contour.
    OuterLips,
    /// Inner lip contour.
    InnerLips,
    /// Left eyebrow, from the subject's point of view.
    LeftEyebrow,
    /// Right eyebrow, from the subject's point of view.
    RightEyebrow,
    /// Left eye contour.
    LeftEye,
    /// Right eye contour.
    RightEye,
    /// Nose outline.
    Nose,
    /// Jaw and cheek contour.
    FaceContour,
}

impl LandmarkRegion {
    /// Kebab-case name, as used in landmark JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OuterLips => "outer-lips",
            Self::InnerLips => "inner-lips",
            Self::LeftEyebrow => "left-eyebrow",
            Self::RightEyebrow => "right-eyebrow",
            Self::LeftEye => "left-eye",
            Self::RightEye => "right-eye",
            Self::Nose => "nose",
            Self::FaceContour => "face-contour",
        }
    }
}

/// One detected face: a normalized bounding box plus landmark groups local to it.
///
/// Both the box and the points use a bottom-left origin with y increasing upward.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FaceRecord {
    /// Face region in normalized image coordinates.
    pub bounding_box: NormalizedRect,
    /// Landmark groups keyed by region. A missing key means the group was not reported.
    #[serde(default)]
    pub landmarks: BTreeMap<LandmarkRegion, Vec<NormalizedPoint>>,
}

impl FaceRecord {
    /// A face with no landmark groups.
    pub fn new(bounding_box: NormalizedRect) -> Self {
        Self {
            bounding_box,
            landmarks: BTreeMap::new(),
        }
    }

    /// Builder-style insert of one landmark group.
    pub fn with_landmarks(
        mut self,
        region: LandmarkRegion,
        points: impl IntoIterator<Item = NormalizedPoint>,
    ) -> Self {
        self.landmarks.insert(region, points.into_iter().collect());
        self
    }

    /// `None` when the group is absent; `Some(&[])` when present but empty.
    pub fn landmark_group(&self, region: LandmarkRegion) -> Option<&[NormalizedPoint]> {
        self.landmarks.get(&region).map(Vec::as_slice)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/detect/face.rs"]
mod tests;

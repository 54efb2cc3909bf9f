//! Detector-local landmark coordinates to original-image pixels.
//!
//! Two stages, each flipping the vertical axis from the detector's
//! bottom-left/up convention to the raster's top-left/down convention:
//!
//! 1. box-local normalized point -> analysis-resolution pixel
//! 2. analysis-resolution pixel -> original-resolution pixel
//!
//! Inputs outside `[0,1]` are mapped as-is.

use crate::foundation::core::{
    ImageSize, MappedPoint, NormalizedPoint, NormalizedRect, ScaleFactors,
};

/// Stage A: a box-local point in analysis-image pixels.
pub fn to_resized_pixel(
    point: NormalizedPoint,
    bounding_box: NormalizedRect,
    resized: ImageSize,
) -> MappedPoint {
    let rw = f64::from(resized.width);
    let rh = f64::from(resized.height);
    let x = bounding_box.x * rw + point.x * bounding_box.width * rw;
    let y = (1.0 - bounding_box.y - bounding_box.height) * rh
        + (1.0 - point.y) * bounding_box.height * rh;
    MappedPoint::new(x, y)
}

/// Stage B: an analysis-image pixel in original-image pixels.
pub fn to_original_pixel(resized_px: MappedPoint, scale: ScaleFactors) -> MappedPoint {
    MappedPoint::new(
        resized_px.x * scale.width_scale,
        resized_px.y * scale.height_scale,
    )
}

/// Both stages for one point.
pub fn map_landmark(
    point: NormalizedPoint,
    bounding_box: NormalizedRect,
    resized: ImageSize,
    scale: ScaleFactors,
) -> MappedPoint {
    to_original_pixel(to_resized_pixel(point, bounding_box, resized), scale)
}

/// Mapping parameters for every landmark of one face in one call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LandmarkMapper {
    /// Face box in normalized analysis-image coordinates.
    pub bounding_box: NormalizedRect,
    /// Analysis-image dimensions.
    pub resized: ImageSize,
    /// Analysis-to-original factors.
    pub scale: ScaleFactors,
}

impl LandmarkMapper {
    /// Bundle the parameters.
    pub fn new(bounding_box: NormalizedRect, resized: ImageSize, scale: ScaleFactors) -> Self {
        Self {
            bounding_box,
            resized,
            scale,
        }
    }

    /// Stage A only.
    pub fn to_resized(&self, point: NormalizedPoint) -> MappedPoint {
        to_resized_pixel(point, self.bounding_box, self.resized)
    }

    /// Full mapping of one point.
    pub fn map_point(&self, point: NormalizedPoint) -> MappedPoint {
        map_landmark(point, self.bounding_box, self.resized, self.scale)
    }

    /// Full mapping of a group, order preserved.
    pub fn map_points(&self, points: &[NormalizedPoint]) -> Vec<MappedPoint> {
        points.iter().map(|&p| self.map_point(p)).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/mapping.rs"]
mod tests;

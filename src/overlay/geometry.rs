use crate::{
    assets::color::OverlayColor,
    foundation::core::{BezPath, MappedPoint, Point},
};

/// Shape of one overlay, in original-image pixels.
#[derive(Clone, Debug, PartialEq)]
pub enum OverlayGeometry {
    /// Points joined by straight edges, closed back to the first point.
    ClosedPolygon(Vec<MappedPoint>),
    /// Open quadratic path through the running midpoints of the points.
    OpenSmoothedCurve(Vec<MappedPoint>),
}

/// One quadratic segment of a smoothed curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadSegment {
    /// Control point (the previous raw landmark).
    pub control: MappedPoint,
    /// End point (midpoint of the previous and current raw landmarks).
    pub end: MappedPoint,
}

/// Minimum number of points for a feature to produce any geometry.
pub const MIN_OVERLAY_POINTS: usize = 2;

/// Closed polygon over the lip contour, in detector order.
pub fn lip_polygon(points: Vec<MappedPoint>) -> OverlayGeometry {
    OverlayGeometry::ClosedPolygon(points)
}

/// Smoothed open curve over one eyebrow, in detector order.
pub fn eyebrow_curve(points: Vec<MappedPoint>) -> OverlayGeometry {
    OverlayGeometry::OpenSmoothedCurve(points)
}

/// Moving-average smoothing: for each point after the first, a quadratic
/// segment controlled by the previous point and ending halfway to the current one.
///
/// The curve does not pass through the landmarks and stops short of the last one.
pub fn smoothed_segments(points: &[MappedPoint]) -> Vec<QuadSegment> {
    points
        .windows(2)
        .map(|w| QuadSegment {
            control: w[0],
            end: w[0].midpoint(w[1]),
        })
        .collect()
}

impl OverlayGeometry {
    /// Points the geometry was built from.
    pub fn points(&self) -> &[MappedPoint] {
        match self {
            Self::ClosedPolygon(p) | Self::OpenSmoothedCurve(p) => p,
        }
    }

    /// `false` when there are too few points to draw anything.
    pub fn is_drawable(&self) -> bool {
        self.points().len() >= MIN_OVERLAY_POINTS
    }

    /// Fillable path, or `None` under [`MIN_OVERLAY_POINTS`] points.
    pub fn to_bezpath(&self) -> Option<BezPath> {
        if !self.is_drawable() {
            return None;
        }

        let mut path = BezPath::new();
        match self {
            Self::ClosedPolygon(points) => {
                path.move_to(Point::from(points[0]));
                for &p in &points[1..] {
                    path.line_to(Point::from(p));
                }
                path.close_path();
            }
            Self::OpenSmoothedCurve(points) => {
                path.move_to(Point::from(points[0]));
                for seg in smoothed_segments(points) {
                    path.quad_to(Point::from(seg.control), Point::from(seg.end));
                }
            }
        }
        Some(path)
    }
}

/// Geometry plus how to paint it.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayLayer {
    /// What to fill.
    pub geometry: OverlayGeometry,
    /// Opaque fill color.
    pub color: OverlayColor,
    /// Alpha applied when the fill is composited, in `[0, 1]`.
    pub opacity: f32,
}

impl OverlayLayer {
    /// Pair geometry with a color and fill-time opacity.
    pub fn new(geometry: OverlayGeometry, color: OverlayColor, opacity: f32) -> Self {
        Self {
            geometry,
            color,
            opacity,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/geometry.rs"]
mod tests;

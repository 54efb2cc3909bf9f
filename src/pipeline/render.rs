use crate::{
    analysis::resize::resize_for_analysis,
    assets::color::OverlayColor,
    detect::{
        face::{FaceRecord, LandmarkRegion},
        oracle::LandmarkOracle,
    },
    foundation::{
        core::{ImageSize, PixelImage},
        error::{FacetintError, FacetintResult},
        settings::PipelineSettings,
    },
    overlay::{
        composite::composite_overlays,
        geometry::{OverlayLayer, eyebrow_curve, lip_polygon},
    },
    transform::mapping::LandmarkMapper,
};

/// Primary face of a source image plus the mapping back to its pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceAnalysis {
    /// First face reported by the oracle.
    pub face: FaceRecord,
    /// Landmark-to-source-pixel mapping for that face.
    pub mapper: LandmarkMapper,
}

/// Downscale `source`, run the oracle on it, and keep the first face.
#[tracing::instrument(skip(source, oracle), fields(width = source.width(), height = source.height()))]
pub fn analyze_face(
    source: &PixelImage,
    oracle: &dyn LandmarkOracle,
    analysis_box: ImageSize,
) -> FacetintResult<FaceAnalysis> {
    let (resized, scale) = resize_for_analysis(source, analysis_box)?;

    let face = oracle
        .detect(&resized)
        .map_err(|e| match e {
            FacetintError::Detection(_) => e,
            other => FacetintError::detection(other.to_string()),
        })?
        .ok_or_else(|| FacetintError::no_face("landmark oracle reported no face"))?;

    let mapper = LandmarkMapper::new(face.bounding_box, resized.size(), scale);
    Ok(FaceAnalysis { face, mapper })
}

/// Closed lip polygon layer. The outer-lips group is required.
pub fn lip_layers(
    analysis: &FaceAnalysis,
    color: OverlayColor,
    opacity: f32,
) -> FacetintResult<Vec<OverlayLayer>> {
    let lips = analysis
        .face
        .landmark_group(LandmarkRegion::OuterLips)
        .ok_or_else(|| {
            FacetintError::missing_landmarks("face has no outer-lips landmark group")
        })?;
    let points = analysis.mapper.map_points(lips);
    tracing::debug!(points = points.len(), "mapped lip contour");
    Ok(vec![OverlayLayer::new(lip_polygon(points), color, opacity)])
}

/// One smoothed-curve layer per eyebrow that is present; absent sides are skipped.
pub fn eyebrow_layers(
    analysis: &FaceAnalysis,
    color: OverlayColor,
    opacity: f32,
) -> Vec<OverlayLayer> {
    [LandmarkRegion::LeftEyebrow, LandmarkRegion::RightEyebrow]
        .into_iter()
        .filter_map(|region| {
            let Some(group) = analysis.face.landmark_group(region) else {
                tracing::debug!(region = region.as_str(), "eyebrow group absent, skipping");
                return None;
            };
            let points = analysis.mapper.map_points(group);
            tracing::debug!(region = region.as_str(), points = points.len(), "mapped eyebrow");
            Some(OverlayLayer::new(eyebrow_curve(points), color, opacity))
        })
        .collect()
}

/// Detect, map and fill the lips of the primary face over a copy of `source`.
pub fn render_lip_color(
    source: &PixelImage,
    oracle: &dyn LandmarkOracle,
    color: OverlayColor,
    settings: &PipelineSettings,
) -> FacetintResult<PixelImage> {
    let analysis = analyze_face(source, oracle, settings.analysis_box())?;
    let layers = lip_layers(&analysis, color, settings.overlay_opacity)?;
    composite_overlays(source, &layers)
}

/// Detect, map and fill both eyebrows of the primary face over a copy of `source`.
///
/// Each side is drawn only if its group is present with at least two points.
pub fn render_eyebrow_color(
    source: &PixelImage,
    oracle: &dyn LandmarkOracle,
    color: OverlayColor,
    settings: &PipelineSettings,
) -> FacetintResult<PixelImage> {
    let analysis = analyze_face(source, oracle, settings.analysis_box())?;
    let layers = eyebrow_layers(&analysis, color, settings.overlay_opacity);
    composite_overlays(source, &layers)
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/render.rs"]
mod tests;

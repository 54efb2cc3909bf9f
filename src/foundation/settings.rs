use std::path::{Path, PathBuf};

use crate::foundation::{
    core::ImageSize,
    error::{FacetintError, FacetintResult},
};

/// Default analysis box side, in pixels.
pub const DEFAULT_ANALYSIS_SIDE: u32 = 512;
/// Default fill-time overlay alpha.
pub const DEFAULT_OVERLAY_OPACITY: f32 = 0.7;
/// Default lossy codec quality (maximum).
pub const DEFAULT_JPEG_QUALITY: u8 = 100;

/// Tunables shared by every operation of a [`crate::FacePipeline`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineSettings {
    /// Width of the box the detector input is fitted into.
    pub analysis_width: u32,
    /// Height of the box the detector input is fitted into.
    pub analysis_height: u32,
    /// Alpha applied when filling each overlay.
    pub overlay_opacity: f32,
    /// JPEG quality, `1..=100`.
    pub jpeg_quality: u8,
    /// Where artifacts are written. `None` uses the system temp directory.
    pub output_dir: Option<PathBuf>,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            analysis_width: DEFAULT_ANALYSIS_SIDE,
            analysis_height: DEFAULT_ANALYSIS_SIDE,
            overlay_opacity: DEFAULT_OVERLAY_OPACITY,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            output_dir: None,
        }
    }
}

impl PipelineSettings {
    /// Read settings from a JSON file; missing fields take their defaults.
    pub fn from_json_path(path: &Path) -> FacetintResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            FacetintError::validation(format!("read settings '{}': {e}", path.display()))
        })?;
        let settings: Self = serde_json::from_slice(&bytes).map_err(|e| {
            FacetintError::validation(format!("parse settings '{}': {e}", path.display()))
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Apply `FACETINT_OUTPUT_DIR`, `FACETINT_JPEG_QUALITY` and
    /// `FACETINT_ANALYSIS_SIZE` when set. Unparsable or zero values are ignored.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(dir) = std::env::var_os("FACETINT_OUTPUT_DIR").filter(|v| !v.is_empty()) {
            self.output_dir = Some(PathBuf::from(dir));
        }
        if let Some(q) = std::env::var("FACETINT_JPEG_QUALITY")
            .ok()
            .and_then(|v| v.parse::<u8>().ok())
            .filter(|&q| q > 0)
        {
            self.jpeg_quality = q;
        }
        if let Some(side) = std::env::var("FACETINT_ANALYSIS_SIZE")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|&n| n > 0)
        {
            self.analysis_width = side;
            self.analysis_height = side;
        }
        self
    }

    /// Reject settings no operation could run with.
    pub fn validate(&self) -> FacetintResult<()> {
        if self.analysis_width == 0 || self.analysis_height == 0 {
            return Err(FacetintError::validation(
                "analysis box must be at least 1x1",
            ));
        }
        if !self.overlay_opacity.is_finite() || !(0.0..=1.0).contains(&self.overlay_opacity) {
            return Err(FacetintError::validation(format!(
                "overlay_opacity must be in [0, 1], got {}",
                self.overlay_opacity
            )));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(FacetintError::validation(format!(
                "jpeg_quality must be in 1..=100, got {}",
                self.jpeg_quality
            )));
        }
        Ok(())
    }

    /// Target box for the analysis resize.
    pub fn analysis_box(&self) -> ImageSize {
        ImageSize::new(self.analysis_width, self.analysis_height)
    }

    /// Resolved artifact directory.
    pub fn resolved_output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/settings.rs"]
mod tests;

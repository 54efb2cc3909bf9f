use image::imageops::FilterType;

use crate::foundation::{
    core::{ImageSize, PixelImage, ScaleFactors},
    error::{FacetintError, FacetintResult},
};

/// Uniform factor that fits `original` inside `target`: `min(tw/ow, th/oh)`.
pub fn fit_scale(original: ImageSize, target: ImageSize) -> f64 {
    let sx = f64::from(target.width) / f64::from(original.width);
    let sy = f64::from(target.height) / f64::from(original.height);
    sx.min(sy)
}

/// Integer output size for [`fit_scale`], never below 1x1.
pub fn fitted_size(original: ImageSize, target: ImageSize) -> FacetintResult<ImageSize> {
    if original.is_degenerate() {
        return Err(FacetintError::resize(format!(
            "source image is {}x{}",
            original.width, original.height
        )));
    }
    if target.is_degenerate() {
        return Err(FacetintError::resize(format!(
            "analysis box is {}x{}",
            target.width, target.height
        )));
    }

    let scale = fit_scale(original, target);
    let side = |v: u32| -> u32 { ((f64::from(v) * scale).round() as u32).max(1) };
    Ok(ImageSize::new(side(original.width), side(original.height)))
}

/// Produce the detector input and the factors that map it back to `source`.
///
/// Scale factors come from the integer output size, so mapping a resized-pixel
/// coordinate through them lands exactly on the matching source pixel.
#[tracing::instrument(skip(source), fields(width = source.width(), height = source.height()))]
pub fn resize_for_analysis(
    source: &PixelImage,
    target: ImageSize,
) -> FacetintResult<(PixelImage, ScaleFactors)> {
    let resized_size = fitted_size(source.size(), target)?;
    let scale = ScaleFactors::between(source.size(), resized_size);

    let resized = if resized_size == source.size() {
        source.clone()
    } else {
        PixelImage::from(image::imageops::resize(
            &source.to_rgba_image(),
            resized_size.width,
            resized_size.height,
            FilterType::Triangle,
        ))
    };

    tracing::debug!(
        resized_width = resized_size.width,
        resized_height = resized_size.height,
        width_scale = scale.width_scale,
        height_scale = scale.height_scale,
        "analysis resize"
    );
    Ok((resized, scale))
}

#[cfg(test)]
#[path = "../../tests/unit/analysis/resize.rs"]
mod tests;

use crate::foundation::core::PixelImage;

/// Luma-only copy of `source`; alpha is kept.
pub fn to_grayscale(source: &PixelImage) -> PixelImage {
    let gray = image::DynamicImage::ImageRgba8(source.to_rgba_image()).grayscale();
    PixelImage::from(gray.to_rgba8())
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/grayscale.rs"]
mod tests;

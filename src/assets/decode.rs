use crate::foundation::{core::PixelImage, error::FacetintError, error::FacetintResult};

/// Decode an encoded image (format sniffed from the bytes) into straight RGBA8.
pub fn decode_image(bytes: &[u8]) -> FacetintResult<PixelImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| FacetintError::load(format!("decode image from memory: {e}")))?;
    Ok(PixelImage::from(dyn_img.to_rgba8()))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;

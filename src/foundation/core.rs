use std::sync::Arc;

use crate::foundation::error::{FacetintError, FacetintResult};

pub use kurbo::{BezPath, Point};

/// Pixel dimensions of an image or target box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ImageSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ImageSize {
    /// Construct a size from width and height.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// `true` if either side is zero.
    pub fn is_degenerate(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Immutable straight-alpha RGBA8 raster, row-major.
///
/// Cloning shares the pixel buffer; every stage that "modifies" an image
/// returns a new value instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelImage {
    width: u32,
    height: u32,
    rgba8: Arc<Vec<u8>>,
}

impl PixelImage {
    /// Wrap an RGBA8 buffer. Fails when `data.len() != width * height * 4`.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> FacetintResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| FacetintError::validation("image dimensions overflow"))?;
        if data.len() != expected {
            return Err(FacetintError::validation(format!(
                "rgba8 buffer has {} bytes, expected {expected} for {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8: Arc::new(data),
        })
    }

    /// Uniformly filled image.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let n = width as usize * height as usize;
        let mut data = Vec::with_capacity(n * 4);
        for _ in 0..n {
            data.extend_from_slice(&rgba);
        }
        Self {
            width,
            height,
            rgba8: Arc::new(data),
        }
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Both dimensions.
    pub fn size(&self) -> ImageSize {
        ImageSize::new(self.width, self.height)
    }

    /// Raw straight-alpha RGBA8 bytes.
    pub fn as_rgba8(&self) -> &[u8] {
        self.rgba8.as_slice()
    }

    /// RGBA value at `(x, y)`, or `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = &self.rgba8[i..i + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Copy into an `image` crate buffer.
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_raw(self.width, self.height, self.rgba8.as_ref().clone())
            .unwrap_or_else(|| image::RgbaImage::new(self.width, self.height))
    }
}

impl From<image::RgbaImage> for PixelImage {
    fn from(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            rgba8: Arc::new(img.into_raw()),
        }
    }
}

/// Ratio between an original image and its analysis-resolution copy.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ScaleFactors {
    /// `original.width / resized.width`
    pub width_scale: f64,
    /// `original.height / resized.height`
    pub height_scale: f64,
}

impl ScaleFactors {
    /// Scale factors that undo a resize from `original` to `resized`.
    pub fn between(original: ImageSize, resized: ImageSize) -> Self {
        Self {
            width_scale: f64::from(original.width) / f64::from(resized.width),
            height_scale: f64::from(original.height) / f64::from(resized.height),
        }
    }
}

/// A point in `[0,1]x[0,1]`, origin bottom-left, y up.
///
/// Deserializes from either `{"x": .., "y": ..}` or `[x, y]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct NormalizedPoint {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate, increasing upward.
    pub y: f64,
}

impl NormalizedPoint {
    /// Construct a point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl<'de> serde::Deserialize<'de> for NormalizedPoint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Obj { x: f64, y: f64 },
            Pair([f64; 2]),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Obj { x, y } => Self::new(x, y),
            Repr::Pair([x, y]) => Self::new(x, y),
        })
    }
}

/// Axis-aligned rectangle in normalized image coordinates, origin bottom-left.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NormalizedRect {
    /// Left edge.
    pub x: f64,
    /// Bottom edge.
    pub y: f64,
    /// Width as a fraction of the image width.
    pub width: f64,
    /// Height as a fraction of the image height.
    pub height: f64,
}

impl NormalizedRect {
    /// Construct a rect.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

impl Default for NormalizedRect {
    /// The whole image.
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }
}

/// Pixel coordinate in the original image, origin top-left, y down.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct MappedPoint {
    /// Horizontal pixel coordinate.
    pub x: f64,
    /// Vertical pixel coordinate.
    pub y: f64,
}

impl MappedPoint {
    /// Construct a point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Midpoint between `self` and `other`.
    pub fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

impl From<MappedPoint> for Point {
    fn from(p: MappedPoint) -> Self {
        Point::new(p.x, p.y)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

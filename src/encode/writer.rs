use std::{
    io::Write as _,
    path::{Path, PathBuf},
};

use crate::foundation::{
    core::PixelImage,
    error::{FacetintError, FacetintResult},
    math::mul_div255_u8,
};

/// Opaque handle to a stored artifact (a `file://` URI).
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct OutputReference(String);

impl OutputReference {
    /// Percent-encoded `file://` reference to an absolute filesystem path.
    pub fn from_path(path: &Path) -> FacetintResult<Self> {
        url::Url::from_file_path(path)
            .map(|u| Self(u.into()))
            .map_err(|()| {
                FacetintError::write(format!(
                    "'{}' is not an absolute path",
                    path.display()
                ))
            })
    }

    /// URI string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Filesystem path behind the URI, percent-decoded.
    pub fn to_path(&self) -> PathBuf {
        url::Url::parse(&self.0)
            .ok()
            .and_then(|u| u.to_file_path().ok())
            .unwrap_or_else(|| PathBuf::from(self.0.strip_prefix("file://").unwrap_or(&self.0)))
    }
}

impl std::fmt::Display for OutputReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Persists rendered images and hands back a reference to each.
pub trait ArtifactWriter: Send + Sync {
    /// Encode and store `image` as a new artifact.
    fn write(&self, image: &PixelImage) -> FacetintResult<OutputReference>;
}

/// Encode as baseline JPEG at `quality` (1..=100).
///
/// The image is flattened onto black first, so transparent areas come out black.
pub fn encode_jpeg(image: &PixelImage, quality: u8) -> FacetintResult<Vec<u8>> {
    if image.width() == 0 || image.height() == 0 {
        return Err(FacetintError::encode(format!(
            "cannot encode a {}x{} image",
            image.width(),
            image.height()
        )));
    }
    let rgb = flatten_onto_black(image);

    let mut buf = Vec::new();
    let mut encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100));
    encoder
        .encode_image(&rgb)
        .map_err(|e| FacetintError::encode(format!("jpeg encode: {e}")))?;
    Ok(buf)
}

fn flatten_onto_black(image: &PixelImage) -> image::RgbImage {
    let mut rgb = Vec::with_capacity(image.as_rgba8().len() / 4 * 3);
    for px in image.as_rgba8().chunks_exact(4) {
        let a = u16::from(px[3]);
        rgb.extend(px[..3].iter().map(|&c| mul_div255_u8(u16::from(c), a)));
    }
    image::RgbImage::from_raw(image.width(), image.height(), rgb)
        .unwrap_or_else(|| image::RgbImage::new(image.width(), image.height()))
}

/// Writes `<uuid>.jpg` files into a directory; never reuses a name.
#[derive(Clone, Debug)]
pub struct TempDirWriter {
    dir: PathBuf,
    quality: u8,
}

impl TempDirWriter {
    /// Writer targeting `dir` at the given JPEG quality.
    pub fn new(dir: impl Into<PathBuf>, quality: u8) -> Self {
        Self {
            dir: dir.into(),
            quality,
        }
    }

    /// Writer targeting the system temp directory at maximum quality.
    pub fn in_system_temp() -> Self {
        Self::new(std::env::temp_dir(), 100)
    }

    /// Target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn persist(&self, bytes: &[u8]) -> FacetintResult<PathBuf> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            FacetintError::write(format!(
                "create output dir '{}': {e}",
                self.dir.display()
            ))
        })?;
        let dir = std::path::absolute(&self.dir).map_err(|e| {
            FacetintError::write(format!("resolve '{}': {e}", self.dir.display()))
        })?;

        let path = dir.join(format!("{}.jpg", uuid::Uuid::new_v4()));
        write_new_file(&path, |file| {
            file.write_all(bytes)?;
            file.sync_all()
        })?;
        Ok(path)
    }
}

/// Create `path` (never overwriting) and fill it with `fill`.
///
/// A file that could not be fully written is removed again.
fn write_new_file(
    path: &Path,
    fill: impl FnOnce(&mut std::fs::File) -> std::io::Result<()>,
) -> FacetintResult<()> {
    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| FacetintError::write(format!("create '{}': {e}", path.display())))?;
    if let Err(e) = fill(&mut file) {
        drop(file);
        if let Err(rm) = std::fs::remove_file(path) {
            tracing::warn!(path = %path.display(), error = %rm, "failed to remove partial artifact");
        }
        return Err(FacetintError::write(format!(
            "write '{}': {e}",
            path.display()
        )));
    }
    Ok(())
}

impl ArtifactWriter for TempDirWriter {
    #[tracing::instrument(skip_all, fields(dir = %self.dir.display()))]
    fn write(&self, image: &PixelImage) -> FacetintResult<OutputReference> {
        let bytes = encode_jpeg(image, self.quality)?;
        let path = self.persist(&bytes)?;
        let out = OutputReference::from_path(&path)?;
        tracing::info!(output = %out, bytes = bytes.len(), "artifact written");
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/writer.rs"]
mod tests;

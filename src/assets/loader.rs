use std::path::PathBuf;

use crate::{
    assets::decode::decode_image,
    foundation::{
        core::PixelImage,
        error::{FacetintError, FacetintResult},
    },
};

/// Resolves an image reference (URI or path) into pixels.
pub trait ImageLoader: Send + Sync {
    /// Load and decode the image behind `image_ref`.
    fn load(&self, image_ref: &str) -> FacetintResult<PixelImage>;
}

/// Loads `file://` URIs and plain filesystem paths.
#[derive(Clone, Debug, Default)]
pub struct FsImageLoader;

impl FsImageLoader {
    /// Create a loader.
    pub fn new() -> Self {
        Self
    }
}

impl ImageLoader for FsImageLoader {
    #[tracing::instrument(skip(self))]
    fn load(&self, image_ref: &str) -> FacetintResult<PixelImage> {
        let path = resolve_image_ref(image_ref)?;
        let bytes = std::fs::read(&path).map_err(|e| {
            FacetintError::load(format!("failed to read image '{}': {e}", path.display()))
        })?;
        let img = decode_image(&bytes)?;
        tracing::debug!(width = img.width(), height = img.height(), "decoded source image");
        Ok(img)
    }
}

/// Map a `file://` URI or bare path to a filesystem path.
///
/// URIs are percent-decoded (`my%20photo.png` names `my photo.png`). Any other
/// URI scheme is a [`FacetintError::Load`].
pub fn resolve_image_ref(image_ref: &str) -> FacetintResult<PathBuf> {
    let image_ref = image_ref.trim();
    if image_ref.is_empty() {
        return Err(FacetintError::load("empty image reference"));
    }

    if let Some(rest) = image_ref.strip_prefix("file://") {
        if rest.is_empty() {
            return Err(FacetintError::load(format!(
                "file URI '{image_ref}' has no path"
            )));
        }
        // `file://localhost/x` and `file:///x` both name `/x`.
        return url::Url::parse(image_ref)
            .ok()
            .and_then(|u| u.to_file_path().ok())
            .ok_or_else(|| FacetintError::load(format!("invalid file URI '{image_ref}'")));
    }

    if let Some((scheme, _)) = image_ref.split_once("://") {
        return Err(FacetintError::load(format!(
            "unsupported image reference scheme '{scheme}'"
        )));
    }

    Ok(PathBuf::from(image_ref))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Context as _;
use tokio::sync::oneshot;

use crate::{
    assets::{
        color::OverlayColor,
        loader::{FsImageLoader, ImageLoader},
    },
    detect::oracle::LandmarkOracle,
    encode::writer::{ArtifactWriter, OutputReference, TempDirWriter},
    foundation::{core::PixelImage, error::FacetintResult, settings::PipelineSettings},
    overlay::grayscale::to_grayscale,
    pipeline::render::{render_eyebrow_color, render_lip_color},
};

/// One top-level unit of work.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    /// Luma-only copy of the image; no detection.
    Grayscale {
        /// Source image reference.
        image_ref: String,
    },
    /// Fill the primary face's outer lip contour.
    LipColor {
        /// Source image reference.
        image_ref: String,
        /// `#RRGGBB` / `#RRGGBBAA`, `#` optional.
        hex_color: String,
    },
    /// Fill the primary face's eyebrows, each side independently.
    EyebrowColor {
        /// Source image reference.
        image_ref: String,
        /// `#RRGGBB` / `#RRGGBBAA`, `#` optional.
        hex_color: String,
    },
}

impl Operation {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Grayscale { .. } => "grayscale",
            Self::LipColor { .. } => "lip-color",
            Self::EyebrowColor { .. } => "eyebrow-color",
        }
    }
}

/// Completion signal of a dispatched [`Operation`]; resolves exactly once.
#[derive(Debug)]
pub struct OperationHandle {
    rx: oneshot::Receiver<FacetintResult<OutputReference>>,
}

impl OperationHandle {
    /// Wait for the operation's single outcome.
    pub async fn wait(self) -> FacetintResult<OutputReference> {
        self.rx
            .await
            .context("operation ended without reporting a result")?
    }
}

struct Collaborators {
    loader: Arc<dyn ImageLoader>,
    oracle: Arc<dyn LandmarkOracle>,
    writer: Arc<dyn ArtifactWriter>,
    settings: PipelineSettings,
}

/// Async front door: load, detect, composite and store, one artifact per call.
///
/// Pixel work, detection and file IO run on the blocking pool so the calling
/// task is never stalled. Cloning is cheap and shares the collaborators.
#[derive(Clone)]
pub struct FacePipeline {
    inner: Arc<Collaborators>,
}

impl std::fmt::Debug for FacePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FacePipeline")
            .field("settings", &self.inner.settings)
            .finish_non_exhaustive()
    }
}

impl FacePipeline {
    /// Pipeline over explicit collaborators. Fails if `settings` do not validate.
    pub fn new(
        loader: Arc<dyn ImageLoader>,
        oracle: Arc<dyn LandmarkOracle>,
        writer: Arc<dyn ArtifactWriter>,
        settings: PipelineSettings,
    ) -> FacetintResult<Self> {
        settings.validate()?;
        Ok(Self {
            inner: Arc::new(Collaborators {
                loader,
                oracle,
                writer,
                settings,
            }),
        })
    }

    /// Filesystem loader and JPEG writer configured from `settings`.
    pub fn with_oracle(
        oracle: Arc<dyn LandmarkOracle>,
        settings: PipelineSettings,
    ) -> FacetintResult<Self> {
        let writer = TempDirWriter::new(settings.resolved_output_dir(), settings.jpeg_quality);
        Self::new(
            Arc::new(FsImageLoader::new()),
            oracle,
            Arc::new(writer),
            settings,
        )
    }

    /// Settings this pipeline runs with.
    pub fn settings(&self) -> &PipelineSettings {
        &self.inner.settings
    }

    /// Grayscale copy of `image_ref`.
    #[tracing::instrument(skip(self))]
    pub async fn convert_to_grayscale(&self, image_ref: &str) -> FacetintResult<OutputReference> {
        let source = self.load(image_ref).await?;
        let gray = blocking(move || Ok(to_grayscale(&source))).await?;
        self.store(gray).await
    }

    /// Lip fill on the primary face of `image_ref`.
    #[tracing::instrument(skip(self))]
    pub async fn add_lip_color(
        &self,
        image_ref: &str,
        hex_color: &str,
    ) -> FacetintResult<OutputReference> {
        let color = OverlayColor::from_hex_or_default(hex_color);
        let source = self.load(image_ref).await?;
        let inner = Arc::clone(&self.inner);
        let rendered = blocking(move || {
            render_lip_color(&source, inner.oracle.as_ref(), color, &inner.settings)
        })
        .await?;
        self.store(rendered).await
    }

    /// Eyebrow fill on the primary face of `image_ref`.
    #[tracing::instrument(skip(self))]
    pub async fn recolor_eyebrows(
        &self,
        image_ref: &str,
        hex_color: &str,
    ) -> FacetintResult<OutputReference> {
        let color = OverlayColor::from_hex_or_default(hex_color);
        let source = self.load(image_ref).await?;
        let inner = Arc::clone(&self.inner);
        let rendered = blocking(move || {
            render_eyebrow_color(&source, inner.oracle.as_ref(), color, &inner.settings)
        })
        .await?;
        self.store(rendered).await
    }

    /// Run `op` to completion on the current task.
    pub async fn run(&self, op: Operation) -> FacetintResult<OutputReference> {
        match op {
            Operation::Grayscale { image_ref } => self.convert_to_grayscale(&image_ref).await,
            Operation::LipColor {
                image_ref,
                hex_color,
            } => self.add_lip_color(&image_ref, &hex_color).await,
            Operation::EyebrowColor {
                image_ref,
                hex_color,
            } => self.recolor_eyebrows(&image_ref, &hex_color).await,
        }
    }

    /// Spawn `op` on the ambient tokio runtime and return its completion signal.
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&self, op: Operation) -> OperationHandle {
        let (tx, rx) = oneshot::channel();
        let pipeline = self.clone();
        tokio::spawn(async move {
            let name = op.name();
            let result = pipeline.run(op).await;
            if let Err(e) = &result {
                tracing::warn!(operation = name, kind = %e.kind(), error = %e, "operation failed");
            }
            // The receiver may have been dropped; the outcome is then discarded.
            let _ = tx.send(result);
        });
        OperationHandle { rx }
    }

    async fn load(&self, image_ref: &str) -> FacetintResult<PixelImage> {
        let loader = Arc::clone(&self.inner.loader);
        let image_ref = image_ref.to_owned();
        blocking(move || loader.load(&image_ref)).await
    }

    async fn store(&self, image: PixelImage) -> FacetintResult<OutputReference> {
        let writer = Arc::clone(&self.inner.writer);
        blocking(move || writer.write(&image)).await
    }
}

async fn blocking<T, F>(f: F) -> FacetintResult<T>
where
    F: FnOnce() -> FacetintResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .context("pipeline stage did not complete")?
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/session.rs"]
mod tests;

use serde::Serialize;

/// Convenience result type used across facetint.
pub type FacetintResult<T> = Result<T, FacetintError>;

/// Top-level error taxonomy used by pipeline APIs.
///
/// Every stage fails fast with exactly one of these categories; nothing in the
/// crate retries.
#[derive(thiserror::Error, Debug)]
pub enum FacetintError {
    /// The source image could not be read or decoded.
    #[error("load failure: {0}")]
    Load(String),

    /// The source image has degenerate dimensions.
    #[error("resize failure: {0}")]
    Resize(String),

    /// The landmark oracle reported an internal error.
    #[error("detection failure: {0}")]
    Detection(String),

    /// The landmark oracle returned no face.
    #[error("no face found: {0}")]
    NoFaceFound(String),

    /// A landmark group that has no skip policy was absent.
    #[error("missing required landmarks: {0}")]
    MissingLandmarks(String),

    /// Compositing could not produce an image.
    #[error("render failure: {0}")]
    Render(String),

    /// The lossy codec rejected the rendered image.
    #[error("encode failure: {0}")]
    Encode(String),

    /// The encoded artifact could not be persisted.
    #[error("write failure: {0}")]
    Write(String),

    /// Invalid settings or caller-provided arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or task plumbing.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Stable category tag for a [`FacetintError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// See [`FacetintError::Load`].
    LoadFailure,
    /// See [`FacetintError::Resize`].
    ResizeFailure,
    /// See [`FacetintError::Detection`].
    DetectionFailure,
    /// See [`FacetintError::NoFaceFound`].
    NoFaceFound,
    /// See [`FacetintError::MissingLandmarks`].
    MissingRequiredLandmarks,
    /// See [`FacetintError::Render`].
    RenderFailure,
    /// See [`FacetintError::Encode`].
    EncodeFailure,
    /// See [`FacetintError::Write`].
    WriteFailure,
    /// See [`FacetintError::Validation`].
    InvalidConfig,
    /// See [`FacetintError::Other`].
    Internal,
}

impl ErrorKind {
    /// The tag string reported to callers.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LoadFailure => "LoadFailure",
            Self::ResizeFailure => "ResizeFailure",
            Self::DetectionFailure => "DetectionFailure",
            Self::NoFaceFound => "NoFaceFound",
            Self::MissingRequiredLandmarks => "MissingRequiredLandmarks",
            Self::RenderFailure => "RenderFailure",
            Self::EncodeFailure => "EncodeFailure",
            Self::WriteFailure => "WriteFailure",
            Self::InvalidConfig => "InvalidConfig",
            Self::Internal => "Internal",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category plus human-readable message, as surfaced to callers on failure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FailureReport {
    /// Failure category.
    pub kind: ErrorKind,
    /// Human-readable detail.
    pub message: String,
}

impl FacetintError {
    /// Build a [`FacetintError::Load`] value.
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Build a [`FacetintError::Resize`] value.
    pub fn resize(msg: impl Into<String>) -> Self {
        Self::Resize(msg.into())
    }

    /// Build a [`FacetintError::Detection`] value.
    pub fn detection(msg: impl Into<String>) -> Self {
        Self::Detection(msg.into())
    }

    /// Build a [`FacetintError::NoFaceFound`] value.
    pub fn no_face(msg: impl Into<String>) -> Self {
        Self::NoFaceFound(msg.into())
    }

    /// Build a [`FacetintError::MissingLandmarks`] value.
    pub fn missing_landmarks(msg: impl Into<String>) -> Self {
        Self::MissingLandmarks(msg.into())
    }

    /// Build a [`FacetintError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`FacetintError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`FacetintError::Write`] value.
    pub fn write(msg: impl Into<String>) -> Self {
        Self::Write(msg.into())
    }

    /// Build a [`FacetintError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Category tag of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Load(_) => ErrorKind::LoadFailure,
            Self::Resize(_) => ErrorKind::ResizeFailure,
            Self::Detection(_) => ErrorKind::DetectionFailure,
            Self::NoFaceFound(_) => ErrorKind::NoFaceFound,
            Self::MissingLandmarks(_) => ErrorKind::MissingRequiredLandmarks,
            Self::Render(_) => ErrorKind::RenderFailure,
            Self::Encode(_) => ErrorKind::EncodeFailure,
            Self::Write(_) => ErrorKind::WriteFailure,
            Self::Validation(_) => ErrorKind::InvalidConfig,
            Self::Other(_) => ErrorKind::Internal,
        }
    }

    /// Flatten into the category+message pair handed back to callers.
    pub fn report(&self) -> FailureReport {
        FailureReport {
            kind: self.kind(),
            message: self.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

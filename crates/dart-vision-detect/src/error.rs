use dart_vision_core::{FrameError, ViewId};

/// Errors returned by the axis extractor.
///
/// `EmptySilhouette` is recoverable: the throw attempt is discarded and
/// acquisition continues.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AxisError {
    #[error(transparent)]
    Frame(#[from] FrameError),
    #[error("no usable dart silhouette in view {view} ({points} foreground points)")]
    EmptySilhouette { view: ViewId, points: usize },
}

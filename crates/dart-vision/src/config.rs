//! Pipeline configuration and its live-mutable handle.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use dart_vision_board::BoardGeometry;
use dart_vision_core::{Homography, HomographyRectifier, IdentityRectifier, Rectifier, ViewTriple};
use dart_vision_detect::{AxisParams, BlobFilterParams, DiffParams};
use dart_vision_game::GameParams;
use dart_vision_triangulate::TriangulationParams;
use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid {name} bounds: min {min} > max {max}")]
    Bounds { name: &'static str, min: f64, max: f64 },
}

/// Calibration supplied per view: board-to-camera homographies and the size
/// of the rectified board projection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RectifyParams {
    pub h_img_from_board: ViewTriple<Homography>,
    pub width: usize,
    pub height: usize,
}

/// Every tunable of the throw pipeline.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineParams {
    pub diff: DiffParams,
    pub blob: BlobFilterParams,
    pub axis: AxisParams,
    pub triangulation: TriangulationParams,
    pub game: GameParams,
    /// Per-view board geometry; `None` fits a regulation board to the projection.
    pub board: Option<ViewTriple<BoardGeometry>>,
    /// `None` means frames already arrive in board projection.
    pub rectify: Option<RectifyParams>,
}

impl PipelineParams {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let params: Self = serde_json::from_str(text)?;
        params.validate()?;
        Ok(params)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let b = &self.blob;
        check_bounds("area", b.min_area as f64, b.max_area as f64)?;
        check_bounds("aspect ratio", b.min_aspect as f64, b.max_aspect as f64)
    }

    /// Rectifier described by [`PipelineParams::rectify`].
    pub fn rectifier(&self) -> Arc<dyn Rectifier> {
        match &self.rectify {
            Some(r) => Arc::new(HomographyRectifier::new(r.h_img_from_board, r.width, r.height)),
            None => Arc::new(IdentityRectifier),
        }
    }

    /// Board geometry for a `width × height` projection.
    pub fn board_for(&self, width: usize, height: usize) -> ViewTriple<BoardGeometry> {
        self.board
            .clone()
            .unwrap_or_else(|| ViewTriple::from_fn(|_| BoardGeometry::fit_to_canvas(width, height)))
    }
}

fn check_bounds(name: &'static str, min: f64, max: f64) -> Result<(), ConfigError> {
    if min > max {
        return Err(ConfigError::Bounds { name, min, max });
    }
    Ok(())
}

/// Cloneable handle for changing thresholds while the pipeline runs.
///
/// Readers take a [`snapshot`](SharedParams::snapshot) once per throw cycle.
#[derive(Clone, Debug, Default)]
pub struct SharedParams {
    inner: Arc<RwLock<PipelineParams>>,
}

impl SharedParams {
    pub fn new(params: PipelineParams) -> Self {
        Self {
            inner: Arc::new(RwLock::new(params)),
        }
    }

    pub fn snapshot(&self) -> PipelineParams {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn update(&self, f: impl FnOnce(&mut PipelineParams)) {
        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard);
    }

    pub fn set_edge_bin_threshold(&self, threshold: u8) {
        self.update(|p| p.diff.edge_bin_threshold = threshold);
    }

    pub fn set_diff_min_threshold(&self, threshold: u64) {
        self.update(|p| p.diff.diff_min_threshold = threshold);
    }

    pub fn set_aspect_ratio_bounds(&self, min: f32, max: f32) -> Result<(), ConfigError> {
        check_bounds("aspect ratio", min as f64, max as f64)?;
        self.update(|p| {
            p.blob.min_aspect = min;
            p.blob.max_aspect = max;
        });
        Ok(())
    }

    pub fn set_area_bounds(&self, min: usize, max: usize) -> Result<(), ConfigError> {
        check_bounds("area", min as f64, max as f64)?;
        self.update(|p| {
            p.blob.min_area = min;
            p.blob.max_area = max;
        });
        Ok(())
    }

    pub fn set_blob_fallback(&self, enabled: bool) {
        self.update(|p| p.diff.blob_fallback = enabled);
    }
}

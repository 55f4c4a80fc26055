use serde::{Deserialize, Serialize};

/// Frame differencing parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffParams {
    /// Edge-strength level (0..255) above which a pixel of the change mask is foreground.
    pub edge_bin_threshold: u8,
    /// Minimal sum of binary mask intensities (foreground pixels count 255) to report a change.
    pub diff_min_threshold: u64,
    /// Sharpen the absolute difference before the edge filter.
    pub sharpen: bool,
    /// Fall back to blob detection when the summation test reports no change.
    pub blob_fallback: bool,
}

impl Default for DiffParams {
    fn default() -> Self {
        Self {
            edge_bin_threshold: 40,
            diff_min_threshold: 100 * 255,
            sharpen: true,
            blob_fallback: false,
        }
    }
}

/// Area and aspect bounds for the contour-based fallback detector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlobFilterParams {
    /// Pixel area bounds, inclusive.
    pub min_area: usize,
    pub max_area: usize,
    /// Bounding-box aspect bounds (long side / short side), inclusive.
    pub min_aspect: f32,
    pub max_aspect: f32,
}

impl Default for BlobFilterParams {
    fn default() -> Self {
        Self {
            min_area: 30,
            max_area: 20_000,
            min_aspect: 2.0,
            max_aspect: 40.0,
        }
    }
}

/// Dart axis extraction parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisParams {
    /// Fewer foreground points than this abort the fit.
    pub min_points: usize,
    /// Width of the oriented refinement rectangle (pixels).
    pub refine_width_px: f32,
    /// Number of refinement passes after the coarse fit.
    pub refine_passes: usize,
}

impl Default for AxisParams {
    fn default() -> Self {
        Self {
            min_points: 5,
            refine_width_px: 30.0,
            refine_passes: 1,
        }
    }
}

use serde::{Deserialize, Serialize};

/// Triangulation parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriangulationParams {
    /// Pairwise points closer than this agree with each other (board projection pixels).
    pub agreement_eps: f32,
    /// Valid working rectangle `[x0, y0, x1, y1]`; `None` means the whole canvas.
    pub working_rect: Option<[f32; 4]>,
    /// Brightness each rasterized line adds to the accumulation canvas.
    pub stroke_value: u8,
    /// Half thickness of a rasterized line, in pixels.
    pub stroke_radius: u32,
    /// Accumulated brightness strictly above this marks an intersection pixel.
    pub intersection_threshold: u8,
    /// Also run the raster method after an analytic success and log the gap.
    pub cross_check: bool,
}

impl Default for TriangulationParams {
    fn default() -> Self {
        Self {
            agreement_eps: 120.0,
            working_rect: None,
            stroke_value: 100,
            stroke_radius: 1,
            intersection_threshold: 150,
            cross_check: false,
        }
    }
}

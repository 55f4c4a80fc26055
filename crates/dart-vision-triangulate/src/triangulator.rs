//! Consensus landing point from the three per-view lines.
//!
//! The analytic method is preferred; when it finds no valid pairwise
//! intersection the raster method is tried before the throw is declared
//! unreadable.

use dart_vision_core::{Point2, PolarLine, ViewTriple};
use log::{debug, info};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::analytic::{
    pairwise_intersections, robust_centroid, Consensus, PairwisePoints, WorkingRect,
};
use crate::error::TriangulationError;
use crate::graphical::{accumulate, bright_centroid};
use crate::params::TriangulationParams;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriangulationMethod {
    Analytic,
    Graphical,
}

/// A triangulated landing point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Triangulation {
    pub point: Point2<f32>,
    pub method: TriangulationMethod,
    /// Distance between the analytic and raster points when both were computed.
    pub cross_check_gap: Option<f32>,
}

/// Triangulates in a fixed `width × height` board projection.
#[derive(Clone, Debug)]
pub struct Triangulator {
    params: TriangulationParams,
    width: usize,
    height: usize,
}

impl Triangulator {
    pub fn new(params: TriangulationParams, width: usize, height: usize) -> Self {
        Self {
            params,
            width,
            height,
        }
    }

    pub fn params(&self) -> &TriangulationParams {
        &self.params
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn working_rect(&self) -> WorkingRect {
        self.params
            .working_rect
            .map(WorkingRect::from_array)
            .unwrap_or_else(|| WorkingRect::canvas(self.width, self.height))
    }

    /// The three pairwise intersections, invalid ones as `None`.
    pub fn pairwise(&self, lines: &ViewTriple<PolarLine>) -> PairwisePoints {
        pairwise_intersections(lines, self.width, self.height, &self.working_rect())
    }

    /// Analytic consensus with its outlier bookkeeping.
    pub fn consensus(
        &self,
        lines: &ViewTriple<PolarLine>,
    ) -> Result<Consensus, TriangulationError> {
        let pts = self.pairwise(lines);
        debug!(
            "pairwise points: top/right {:?} top/left {:?} left/right {:?}",
            pts.top_right, pts.top_left, pts.left_right
        );
        robust_centroid(pts.as_array(), self.params.agreement_eps)
            .ok_or(TriangulationError::NoIntersection)
    }

    /// Analytic method.
    pub fn triangulate(
        &self,
        lines: &ViewTriple<PolarLine>,
    ) -> Result<Point2<f32>, TriangulationError> {
        self.consensus(lines).map(|c| c.point)
    }

    /// Raster method: draw, accumulate, average the overlap.
    pub fn triangulate_graphical(
        &self,
        lines: &ViewTriple<PolarLine>,
    ) -> Result<Point2<f32>, TriangulationError> {
        let p = &self.params;
        let canvas = accumulate(lines, self.width, self.height, p.stroke_value, p.stroke_radius);
        let (point, n) = bright_centroid(&canvas, p.intersection_threshold).ok_or(
            TriangulationError::NoOverlap {
                threshold: p.intersection_threshold,
            },
        )?;
        debug!("raster overlap: {n} px, mean {point}");
        Ok(point)
    }

    /// Analytic first, raster when the analytic method finds nothing.
    #[cfg_attr(feature = "tracing", instrument(level = "info", skip(self, lines)))]
    pub fn triangulate_with_fallback(
        &self,
        lines: &ViewTriple<PolarLine>,
    ) -> Result<Triangulation, TriangulationError> {
        match self.triangulate(lines) {
            Ok(point) => {
                let cross_check_gap = if self.params.cross_check {
                    self.triangulate_graphical(lines)
                        .ok()
                        .map(|g| (g - point).norm())
                } else {
                    None
                };
                if let Some(gap) = cross_check_gap {
                    debug!("raster cross-check gap {gap:.2} px");
                }
                Ok(Triangulation {
                    point,
                    method: TriangulationMethod::Analytic,
                    cross_check_gap,
                })
            }
            Err(err) => {
                info!("analytic triangulation failed ({err}), falling back to raster method");
                let point = self.triangulate_graphical(lines)?;
                Ok(Triangulation {
                    point,
                    method: TriangulationMethod::Graphical,
                    cross_check_gap: None,
                })
            }
        }
    }
}

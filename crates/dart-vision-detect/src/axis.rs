//! Dart axis extraction for one view.
//!
//! Algorithm:
//! 1. Build the view's binary [`ChangeMask`] (difference + edge filter).
//! 2. Coarse localization: nine overlapping regions, each 2/3 of the image
//!    width and height, on a 3×3 grid; keep the one with most foreground.
//! 3. First PCA over the foreground pixels of that region.
//! 4. Refinement: keep only foreground pixels inside a thin rectangle
//!    (`refine_width_px` wide, region-diagonal long) centered on the first
//!    centroid and aligned with the first axis, then fit again. The flight
//!    is wider than the barrel, so this pulls the axis onto barrel and tip.
//! 5. Express centroid + direction as a [`PolarLine`] about the image center.

use dart_vision_core::{Frame, Point2, PolarLine, Rectifier, ViewId};
use log::debug;
use nalgebra::Vector2;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::change::ChangeMask;
use crate::error::AxisError;
use crate::params::{AxisParams, DiffParams};
use crate::pca::{principal_axis, PrincipalAxis};

/// Axis-aligned image region in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub x0: usize,
    pub y0: usize,
    pub width: usize,
    pub height: usize,
}

impl Region {
    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x0 && y >= self.y0 && x < self.x0 + self.width && y < self.y0 + self.height
    }

    pub fn diagonal(&self) -> f32 {
        ((self.width * self.width + self.height * self.height) as f32).sqrt()
    }

    /// The nine overlapping 2/3-size regions of a `w × h` image, row-major.
    pub fn coarse_grid(w: usize, h: usize) -> [Region; 9] {
        let rw = 2 * w / 3;
        let rh = 2 * h / 3;
        let step_x = (w - rw) / 2;
        let step_y = (h - rh) / 2;
        std::array::from_fn(|k| Region {
            x0: (k % 3) * step_x,
            y0: (k / 3) * step_y,
            width: rw,
            height: rh,
        })
    }
}

/// Thin rectangle aligned with a first-pass axis.
#[derive(Clone, Copy, Debug)]
struct OrientedRect {
    center: Point2<f32>,
    along: Vector2<f32>,
    half_length: f32,
    half_width: f32,
}

impl OrientedRect {
    #[inline]
    fn contains(&self, p: Point2<f32>) -> bool {
        let d = p - self.center;
        let a = d.dot(&self.along);
        let c = d.x * -self.along.y + d.y * self.along.x;
        a.abs() < self.half_length && c.abs() < self.half_width
    }
}

/// Result of a successful axis fit.
#[derive(Clone, Copy, Debug)]
pub struct AxisFit {
    pub line: PolarLine,
    pub centroid: Point2<f32>,
    pub direction: Vector2<f32>,
    /// Foreground pixels used by the final fit.
    pub support: usize,
    /// Region chosen by coarse localization.
    pub region: Region,
}

#[derive(Clone, Debug, Default)]
pub struct AxisExtractor {
    params: AxisParams,
}

impl AxisExtractor {
    pub fn new(params: AxisParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &AxisParams {
        &self.params
    }

    /// Difference two frames of `view` and return the dart axis.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "info",
            skip(self, previous, current, rectifier, diff),
            fields(view = %view)
        )
    )]
    pub fn extract_axis(
        &self,
        previous: &Frame,
        current: &Frame,
        view: ViewId,
        rectifier: &dyn Rectifier,
        diff: &DiffParams,
    ) -> Result<PolarLine, AxisError> {
        let mask = ChangeMask::compute(view, previous, current, rectifier, diff)?;
        Ok(self.fit_mask(&mask)?.line)
    }

    /// Fit the dart axis on a precomputed change mask.
    pub fn fit_mask(&self, mask: &ChangeMask) -> Result<AxisFit, AxisError> {
        let (w, h) = (mask.width(), mask.height());
        let view = mask.view;
        let empty = |points| AxisError::EmptySilhouette { view, points };

        let foreground: Vec<(usize, usize)> = mask
            .mask
            .data
            .iter()
            .enumerate()
            .filter(|(_, &v)| v != 0)
            .map(|(i, _)| (i % w, i / w))
            .collect();
        if foreground.is_empty() {
            return Err(empty(0));
        }

        let region = Region::coarse_grid(w, h)
            .into_iter()
            .enumerate()
            .map(|(k, r)| {
                let count = foreground.iter().filter(|&&(x, y)| r.contains(x, y)).count();
                (k, r, count)
            })
            // first region wins ties
            .max_by(|a, b| a.2.cmp(&b.2).then(b.0.cmp(&a.0)))
            .map(|(_, r, _)| r)
            .ok_or_else(|| empty(foreground.len()))?;

        let coarse: Vec<Point2<f32>> = foreground
            .iter()
            .filter(|&&(x, y)| region.contains(x, y))
            .map(|&(x, y)| pixel_center(x, y))
            .collect();
        let mut axis = self.fit(&coarse).ok_or_else(|| empty(coarse.len()))?;
        let mut support = coarse.len();

        let all: Vec<Point2<f32>> = foreground.iter().map(|&(x, y)| pixel_center(x, y)).collect();
        for pass in 0..self.params.refine_passes {
            let rect = OrientedRect {
                center: axis.centroid,
                along: axis.direction,
                half_length: 0.5 * region.diagonal(),
                half_width: 0.5 * self.params.refine_width_px,
            };
            let inside: Vec<Point2<f32>> =
                all.iter().copied().filter(|&p| rect.contains(p)).collect();
            axis = self.fit(&inside).ok_or_else(|| empty(inside.len()))?;
            support = inside.len();
            debug!(
                "view {view}: refine pass {pass} kept {support} px, anisotropy {:.4}",
                axis.anisotropy()
            );
        }

        let center = Point2::new(0.5 * w as f32, 0.5 * h as f32);
        let line = PolarLine::from_point_direction(axis.centroid, axis.direction, center)
            .ok_or_else(|| empty(support))?;

        Ok(AxisFit {
            line,
            centroid: axis.centroid,
            direction: axis.direction,
            support,
            region,
        })
    }

    fn fit(&self, points: &[Point2<f32>]) -> Option<PrincipalAxis> {
        if points.len() < self.params.min_points.max(2) {
            return None;
        }
        principal_axis(points)
    }
}

#[inline]
fn pixel_center(x: usize, y: usize) -> Point2<f32> {
    Point2::new(x as f32 + 0.5, y as f32 + 0.5)
}

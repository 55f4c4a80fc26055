//! Polar lines relative to an image center and their clipped Cartesian form.
//!
//! A [`PolarLine`] `{r, θ}` is the set of points `p` with
//! `(p - c) · (cos θ, sin θ) = r`, where `c` is the image center. `θ` is kept
//! in `[0, π)`; the sign of `r` tells which side of the center the line lies
//! on. Image coordinates are used throughout (x right, y down).

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Relative tolerance on `|sin|` of the angle between two lines below which
/// they are treated as parallel.
const PARALLEL_EPS: f32 = 1e-6;

/// Wrap an angle into `[0, π)`.
#[inline]
pub fn wrap_angle_pi(theta: f32) -> f32 {
    let t = theta.rem_euclid(PI);
    if t >= PI {
        0.0
    } else {
        t
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolarLine {
    pub r: f32,
    pub theta: f32,
}

impl PolarLine {
    /// Build a line, normalizing `theta` into `[0, π)` and flipping the sign
    /// of `r` for every half-turn removed.
    pub fn new(r: f32, theta: f32) -> Self {
        let t = wrap_angle_pi(theta);
        let half_turns = ((theta - t) / PI).round() as i64;
        let r = if half_turns.rem_euclid(2) == 0 { r } else { -r };
        Self { r, theta: t }
    }

    /// Line through `point` with direction `dir`, expressed relative to `center`.
    ///
    /// Returns `None` for a zero-length direction.
    pub fn from_point_direction(
        point: Point2<f32>,
        dir: Vector2<f32>,
        center: Point2<f32>,
    ) -> Option<Self> {
        let len = dir.norm();
        if !len.is_finite() || len <= f32::EPSILON {
            return None;
        }
        let d = dir / len;
        let n = Vector2::new(-d.y, d.x);
        let theta = n.y.atan2(n.x);
        let r = (point - center).dot(&n);
        Some(Self::new(r, theta))
    }

    /// Line through two points, relative to `center`.
    pub fn through(p0: Point2<f32>, p1: Point2<f32>, center: Point2<f32>) -> Option<Self> {
        Self::from_point_direction(p0, p1 - p0, center)
    }

    /// Unit normal `(cos θ, sin θ)`.
    #[inline]
    pub fn normal(&self) -> Vector2<f32> {
        Vector2::new(self.theta.cos(), self.theta.sin())
    }

    /// Unit direction along the line.
    #[inline]
    pub fn direction(&self) -> Vector2<f32> {
        Vector2::new(-self.theta.sin(), self.theta.cos())
    }

    /// Point of the line closest to `center`.
    #[inline]
    pub fn foot(&self, center: Point2<f32>) -> Point2<f32> {
        center + self.normal() * self.r
    }

    /// Unsigned distance from `p` to the line.
    pub fn distance_to(&self, p: Point2<f32>, center: Point2<f32>) -> f32 {
        ((p - center).dot(&self.normal()) - self.r).abs()
    }

    /// Clip against the `[0, width] x [0, height]` rectangle whose center is
    /// the line's reference point.
    ///
    /// Returns `None` when the line misses the rectangle.
    pub fn clip_to_rect(&self, width: usize, height: usize) -> Option<CartesianSegment> {
        let (w, h) = (width as f32, height as f32);
        let center = Point2::new(0.5 * w, 0.5 * h);
        let f = self.foot(center);
        let d = self.direction();

        let mut t_min = f32::NEG_INFINITY;
        let mut t_max = f32::INFINITY;
        for (origin, delta, lo, hi) in [(f.x, d.x, 0.0, w), (f.y, d.y, 0.0, h)] {
            if delta.abs() <= f32::EPSILON {
                if origin < lo || origin > hi {
                    return None;
                }
                continue;
            }
            let a = (lo - origin) / delta;
            let b = (hi - origin) / delta;
            t_min = t_min.max(a.min(b));
            t_max = t_max.min(a.max(b));
        }
        if t_min > t_max {
            return None;
        }
        Some(CartesianSegment {
            p0: f + d * t_min,
            p1: f + d * t_max,
        })
    }
}

/// Endpoints of a [`PolarLine`] clipped to an image rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartesianSegment {
    pub p0: Point2<f32>,
    pub p1: Point2<f32>,
}

impl CartesianSegment {
    pub fn new(p0: Point2<f32>, p1: Point2<f32>) -> Self {
        Self { p0, p1 }
    }

    pub fn length(&self) -> f32 {
        (self.p1 - self.p0).norm()
    }

    pub fn midpoint(&self) -> Point2<f32> {
        Point2::from((self.p0.coords + self.p1.coords) * 0.5)
    }

    /// Back to polar form relative to `center`.
    pub fn to_polar(&self, center: Point2<f32>) -> Option<PolarLine> {
        PolarLine::through(self.p0, self.p1, center)
    }

    /// Intersection of the infinite lines carrying `self` and `other`.
    ///
    /// Standard 2D determinant form; `None` when the lines are parallel.
    pub fn intersect_lines(&self, other: &CartesianSegment) -> Option<Point2<f32>> {
        let (x1, y1, x2, y2) = (self.p0.x, self.p0.y, self.p1.x, self.p1.y);
        let (x3, y3, x4, y4) = (other.p0.x, other.p0.y, other.p1.x, other.p1.y);

        let den = (x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4);
        let scale = self.length() * other.length();
        if scale <= f32::EPSILON || den.abs() <= PARALLEL_EPS * scale {
            return None;
        }

        let a = x1 * y2 - y1 * x2;
        let b = x3 * y4 - y3 * x4;
        let px = (a * (x3 - x4) - (x1 - x2) * b) / den;
        let py = (a * (y3 - y4) - (y1 - y2) * b) / den;
        Some(Point2::new(px, py))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_same_line(a: PolarLine, b: PolarLine) {
        assert_abs_diff_eq!(a.theta, b.theta, epsilon = 1e-3);
        assert_abs_diff_eq!(a.r, b.r, epsilon = 1e-2);
    }

    #[test]
    fn new_normalizes_theta_and_flips_r() {
        let l = PolarLine::new(10.0, -0.25 * PI);
        assert_abs_diff_eq!(l.theta, 0.75 * PI, epsilon = 1e-6);
        assert_abs_diff_eq!(l.r, -10.0, epsilon = 1e-6);

        let l = PolarLine::new(5.0, PI);
        assert_abs_diff_eq!(l.theta, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(l.r, -5.0, epsilon = 1e-6);

        let l = PolarLine::new(5.0, 2.0 * PI + 0.1);
        assert_abs_diff_eq!(l.theta, 0.1, epsilon = 1e-5);
        assert_abs_diff_eq!(l.r, 5.0, epsilon = 1e-6);
    }

    #[test]
    fn wrap_angle_stays_in_half_open_range() {
        for t in [-7.0f32, -PI, -0.1, 0.0, 1.0, PI, 4.0, 10.0] {
            let w = wrap_angle_pi(t);
            assert!((0.0..PI).contains(&w), "{t} -> {w}");
        }
    }

    #[test]
    fn clipped_segment_round_trips_to_same_line() {
        let (w, h) = (640usize, 480usize);
        let center = Point2::new(320.0, 240.0);
        for k in 0..36 {
            let theta = k as f32 * PI / 36.0;
            for r in [-150.0f32, -20.0, 0.0, 35.5, 200.0] {
                let line = PolarLine::new(r, theta);
                let seg = line.clip_to_rect(w, h).expect("line crosses image");
                let back = seg.to_polar(center).expect("non-degenerate segment");
                assert_same_line(line, back);
            }
        }
    }

    #[test]
    fn clip_misses_rect_far_away() {
        assert!(PolarLine::new(1000.0, 0.3).clip_to_rect(100, 100).is_none());
        assert!(PolarLine::new(80.0, 0.0).clip_to_rect(100, 100).is_none());
    }

    #[test]
    fn perpendicular_lines_meet_at_expected_point() {
        let center = Point2::new(200.0, 200.0);
        let vertical = PolarLine::new(30.0, 0.0).clip_to_rect(400, 400).unwrap();
        let horizontal = PolarLine::new(-50.0, 0.5 * PI).clip_to_rect(400, 400).unwrap();
        let p = vertical.intersect_lines(&horizontal).unwrap();
        assert_abs_diff_eq!(p.x, center.x + 30.0, epsilon = 1e-3);
        assert_abs_diff_eq!(p.y, center.y - 50.0, epsilon = 1e-3);
    }

    #[test]
    fn parallel_lines_have_no_intersection() {
        let a = PolarLine::new(10.0, 0.7).clip_to_rect(400, 400).unwrap();
        let b = PolarLine::new(-40.0, 0.7).clip_to_rect(400, 400).unwrap();
        assert!(a.intersect_lines(&b).is_none());
        assert!(a.intersect_lines(&a).is_none());
    }

    #[test]
    fn from_point_direction_rejects_zero_direction() {
        let c = Point2::new(0.0, 0.0);
        assert!(PolarLine::from_point_direction(c, Vector2::zeros(), c).is_none());
    }
}

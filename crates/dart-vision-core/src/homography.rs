//! Board-to-camera homographies and the perspective warp into board space.

use crate::{sample_bilinear_u8, GrayImage, GrayImageView};
use nalgebra::{Matrix3, Point2, SMatrix, SVector, Vector3};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Homography {
    pub h: Matrix3<f64>,
}

impl Homography {
    pub fn new(h: Matrix3<f64>) -> Self {
        Self { h }
    }

    #[inline]
    pub fn apply(&self, p: Point2<f32>) -> Point2<f32> {
        let v = self.h * Vector3::new(p.x as f64, p.y as f64, 1.0);
        Point2::new((v[0] / v[2]) as f32, (v[1] / v[2]) as f32)
    }
}

/// Hartley conditioning: move the four points to their centroid and scale
/// them to a mean distance of √2. Returns the conditioned points and the
/// transform that produced them.
fn condition(pts: &[Point2<f32>; 4]) -> ([Point2<f64>; 4], Matrix3<f64>) {
    let pts = pts.map(|p| Point2::new(p.x as f64, p.y as f64));
    let centroid = pts.iter().fold(Vector3::zeros(), |acc, p| {
        acc + Vector3::new(p.x, p.y, 0.0)
    }) / 4.0;
    let spread = pts
        .iter()
        .map(|p| ((p.x - centroid.x).powi(2) + (p.y - centroid.y).powi(2)).sqrt())
        .sum::<f64>()
        / 4.0;
    let s = if spread > 1e-12 {
        std::f64::consts::SQRT_2 / spread
    } else {
        1.0
    };
    let t = Matrix3::new(
        s, 0.0, -s * centroid.x, //
        0.0, s, -s * centroid.y, //
        0.0, 0.0, 1.0,
    );
    let conditioned = pts.map(|p| Point2::new(s * (p.x - centroid.x), s * (p.y - centroid.y)));
    (conditioned, t)
}

/// Homography `H` with `dst ~ H * src` from four correspondences.
///
/// Corner order must match between `src` and `dst`. Calibration passes `src`
/// in the canonical board projection and `dst` in the camera image, which is
/// the direction [`warp_perspective_gray`] expects. `None` when the corner
/// system is singular.
pub fn homography_from_4pt(src: &[Point2<f32>; 4], dst: &[Point2<f32>; 4]) -> Option<Homography> {
    let (s, t_src) = condition(src);
    let (d, t_dst) = condition(dst);

    // eight unknowns h11..h32 with h33 fixed to 1; two rows per corner
    let mut a = SMatrix::<f64, 8, 8>::zeros();
    let mut b = SVector::<f64, 8>::zeros();
    for (k, (p, q)) in s.iter().zip(&d).enumerate() {
        let rows = [
            [p.x, p.y, 1.0, 0.0, 0.0, 0.0, -q.x * p.x, -q.x * p.y],
            [0.0, 0.0, 0.0, p.x, p.y, 1.0, -q.y * p.x, -q.y * p.y],
        ];
        for (i, (row, rhs)) in rows.iter().zip([q.x, q.y]).enumerate() {
            for (j, &v) in row.iter().enumerate() {
                a[(2 * k + i, j)] = v;
            }
            b[2 * k + i] = rhs;
        }
    }
    let x = a.lu().solve(&b)?;
    let conditioned = Matrix3::new(x[0], x[1], x[2], x[3], x[4], x[5], x[6], x[7], 1.0);

    let h = t_dst.try_inverse()? * conditioned * t_src;
    let scale = h[(2, 2)];
    if scale.abs() < 1e-12 {
        return None;
    }
    Some(Homography::new(h / scale))
}

/// Warp into the board projection: every output pixel center is mapped into
/// the camera image through `h_img_from_board` and sampled bilinearly.
pub fn warp_perspective_gray(
    src: &GrayImageView<'_>,
    h_img_from_board: Homography,
    out_w: usize,
    out_h: usize,
) -> GrayImage {
    let data = (0..out_w * out_h)
        .map(|i| {
            let board = Point2::new((i % out_w) as f32 + 0.5, (i / out_w) as f32 + 0.5);
            let img = h_img_from_board.apply(board);
            sample_bilinear_u8(src, img.x - 0.5, img.y - 0.5)
        })
        .collect();
    GrayImage {
        width: out_w,
        height: out_h,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn near(a: Point2<f32>, b: Point2<f32>, tol: f32) -> bool {
        (a - b).abs().max() < tol
    }

    #[test]
    fn four_point_recovers_board_to_camera_mapping() {
        let ground_truth = Homography::new(Matrix3::new(
            0.8, 0.05, 120.0, //
            -0.02, 1.1, 80.0, //
            0.0009, -0.0004, 1.0,
        ));
        let board = [
            Point2::new(0.0_f32, 0.0),
            Point2::new(400.0, 0.0),
            Point2::new(400.0, 400.0),
            Point2::new(0.0, 400.0),
        ];
        let img = board.map(|p| ground_truth.apply(p));
        let recovered = homography_from_4pt(&board, &img).expect("recoverable");

        for p in [
            Point2::new(0.0_f32, 0.0),
            Point2::new(200.0, 200.0),
            Point2::new(310.0, 45.0),
        ] {
            let (got, want) = (recovered.apply(p), ground_truth.apply(p));
            assert!(near(got, want, 1e-2), "{got} vs {want}");
        }
    }

    #[test]
    fn identity_warp_preserves_pixels() {
        let mut src = GrayImage::new(8, 6);
        src.set(3, 2, 200);
        src.set(7, 5, 17);
        let out = warp_perspective_gray(&src.view(), Homography::new(Matrix3::identity()), 8, 6);
        assert_eq!(out, src);
    }
}

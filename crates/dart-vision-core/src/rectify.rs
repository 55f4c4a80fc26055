//! Rectification into the common top-down board projection.
//!
//! Computing the per-view perspective correction belongs to calibration; the
//! pipeline only applies it through the [`Rectifier`] seam.

use crate::{
    homography_from_4pt, warp_perspective_gray, GrayImage, GrayImageView, Homography, ViewId,
    ViewTriple,
};
use nalgebra::Point2;

/// Maps a camera image of one view into the canonical board projection.
pub trait Rectifier: Send + Sync {
    fn rectify(&self, view: ViewId, src: &GrayImageView<'_>) -> GrayImage;
}

/// Frames are already in board projection.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityRectifier;

impl Rectifier for IdentityRectifier {
    fn rectify(&self, _view: ViewId, src: &GrayImageView<'_>) -> GrayImage {
        src.to_owned_image()
    }
}

/// One board-to-camera homography per view, warped to a fixed output size.
#[derive(Clone, Debug)]
pub struct HomographyRectifier {
    pub h_img_from_board: ViewTriple<Homography>,
    pub out_w: usize,
    pub out_h: usize,
}

impl HomographyRectifier {
    pub fn new(h_img_from_board: ViewTriple<Homography>, out_w: usize, out_h: usize) -> Self {
        Self {
            h_img_from_board,
            out_w,
            out_h,
        }
    }

    /// Build from four reference points per view, given in camera pixels and
    /// listed in the same order as `board_pts` (board projection pixels).
    ///
    /// Returns `None` if any view's points are degenerate.
    pub fn from_reference_points(
        board_pts: &[Point2<f32>; 4],
        img_pts: &ViewTriple<[Point2<f32>; 4]>,
        out_w: usize,
        out_h: usize,
    ) -> Option<Self> {
        let h = ViewTriple::new(
            homography_from_4pt(board_pts, &img_pts.top)?,
            homography_from_4pt(board_pts, &img_pts.right)?,
            homography_from_4pt(board_pts, &img_pts.left)?,
        );
        Some(Self::new(h, out_w, out_h))
    }
}

impl Rectifier for HomographyRectifier {
    fn rectify(&self, view: ViewId, src: &GrayImageView<'_>) -> GrayImage {
        warp_perspective_gray(src, *self.h_img_from_board.get(view), self.out_w, self.out_h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_points_produce_scaling_warp() {
        let board = [
            Point2::new(0.0_f32, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(4.0, 4.0),
            Point2::new(0.0, 4.0),
        ];
        // camera sees the board at twice the resolution
        let img = board.map(|p| Point2::new(2.0 * p.x, 2.0 * p.y));
        let rect = HomographyRectifier::from_reference_points(
            &board,
            &ViewTriple::new(img, img, img),
            4,
            4,
        )
        .expect("non-degenerate");

        let mut src = GrayImage::new(8, 8);
        for y in 0..8 {
            for x in 0..8 {
                src.set(x, y, if x >= 4 { 255 } else { 0 });
            }
        }
        let out = rect.rectify(ViewId::Right, &src.view());
        assert_eq!((out.width, out.height), (4, 4));
        assert_eq!(out.get(0, 1), 0);
        assert_eq!(out.get(3, 1), 255);
    }

    #[test]
    fn identity_rectifier_copies() {
        let src = GrayImage::new(3, 2);
        assert_eq!(IdentityRectifier.rectify(ViewId::Top, &src.view()), src);
    }
}

//! Frame differencing: did a new dart land between two frames of one view?
//!
//! Both frames are converted to gray, rectified into the board projection,
//! smoothed, absolute-differenced, optionally sharpened, passed through a
//! Sobel edge filter and binarized. The binary image is the view's
//! [`ChangeMask`]; its intensity sum against `diff_min_threshold` decides
//! [`ChangeStatus`].

use dart_vision_core::{Frame, FrameError, GrayImage, Rectifier, ViewId};
use log::debug;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::blob::find_blobs;
use crate::filters::{abs_diff, gaussian_blur5, sharpen, sobel_magnitude, threshold_binary};
use crate::params::{BlobFilterParams, DiffParams};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeStatus {
    NoChange,
    Changed,
}

impl ChangeStatus {
    pub fn is_changed(self) -> bool {
        self == ChangeStatus::Changed
    }
}

/// Binary edge image of what changed between two frames of one view.
#[derive(Clone, Debug)]
pub struct ChangeMask {
    pub view: ViewId,
    pub mask: GrayImage,
}

impl ChangeMask {
    /// Validate, gray-convert and rectify both frames, then build the mask.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "debug",
            skip(previous, current, rectifier, params),
            fields(view = %view)
        )
    )]
    pub fn compute(
        view: ViewId,
        previous: &Frame,
        current: &Frame,
        rectifier: &dyn Rectifier,
        params: &DiffParams,
    ) -> Result<Self, FrameError> {
        Frame::check_pair(view, previous, current)?;
        let prev = rectifier.rectify(view, &previous.to_gray().view());
        let cur = rectifier.rectify(view, &current.to_gray().view());
        Ok(Self::from_rectified(view, &prev, &cur, params))
    }

    /// Build the mask from two gray images already in board projection.
    pub fn from_rectified(
        view: ViewId,
        previous: &GrayImage,
        current: &GrayImage,
        params: &DiffParams,
    ) -> Self {
        let prev = gaussian_blur5(previous);
        let cur = gaussian_blur5(current);
        let mut diff = abs_diff(&prev, &cur);
        if params.sharpen {
            diff = sharpen(&diff);
        }
        let edges = sobel_magnitude(&diff);
        let mask = threshold_binary(&edges, params.edge_bin_threshold);
        Self { view, mask }
    }

    pub fn width(&self) -> usize {
        self.mask.width
    }

    pub fn height(&self) -> usize {
        self.mask.height
    }

    pub fn intensity_sum(&self) -> u64 {
        self.mask.intensity_sum()
    }
}

/// Decides `Changed` / `NoChange` for one view.
///
/// Thresholds are operational state, tuned live through the setters.
#[derive(Clone, Debug, Default)]
pub struct ChangeDetector {
    params: DiffParams,
    blob: BlobFilterParams,
}

impl ChangeDetector {
    pub fn new(params: DiffParams, blob: BlobFilterParams) -> Self {
        Self { params, blob }
    }

    pub fn params(&self) -> &DiffParams {
        &self.params
    }

    pub fn blob_params(&self) -> &BlobFilterParams {
        &self.blob
    }

    pub fn set_edge_bin_threshold(&mut self, threshold: u8) {
        self.params.edge_bin_threshold = threshold;
    }

    pub fn set_diff_min_threshold(&mut self, threshold: u64) {
        self.params.diff_min_threshold = threshold;
    }

    pub fn set_blob_filter(&mut self, blob: BlobFilterParams) {
        self.blob = blob;
    }

    /// Full differencing for one view.
    ///
    /// Empty frames are rejected before any processing.
    pub fn detect_change(
        &self,
        previous: &Frame,
        current: &Frame,
        view: ViewId,
        rectifier: &dyn Rectifier,
    ) -> Result<ChangeStatus, FrameError> {
        let mask = ChangeMask::compute(view, previous, current, rectifier, &self.params)?;
        Ok(self.classify(&mask))
    }

    /// Summation test, then the blob fallback when it is enabled.
    pub fn classify(&self, mask: &ChangeMask) -> ChangeStatus {
        let status = self.evaluate(mask);
        if status == ChangeStatus::NoChange && self.params.blob_fallback {
            return self.detect_blob(mask);
        }
        status
    }

    /// Summation test on a precomputed mask.
    pub fn evaluate(&self, mask: &ChangeMask) -> ChangeStatus {
        let sum = mask.intensity_sum();
        debug!(
            "view {}: change sum {} (min {})",
            mask.view, sum, self.params.diff_min_threshold
        );
        if sum > self.params.diff_min_threshold {
            ChangeStatus::Changed
        } else {
            ChangeStatus::NoChange
        }
    }

    /// Contour fallback: any component inside the area/aspect bounds is a change.
    pub fn detect_blob(&self, mask: &ChangeMask) -> ChangeStatus {
        let hit = find_blobs(&mask.mask)
            .iter()
            .find(|b| b.passes(&self.blob))
            .copied();
        match hit {
            Some(b) => {
                debug!(
                    "view {}: blob area {} aspect {:.2} accepted",
                    mask.view,
                    b.area,
                    b.aspect()
                );
                ChangeStatus::Changed
            }
            None => ChangeStatus::NoChange,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dart_vision_core::IdentityRectifier;

    fn frame_with_bar(w: usize, h: usize, bar: Option<(usize, usize, usize, usize)>) -> Frame {
        let mut img = GrayImage {
            width: w,
            height: h,
            data: vec![30; w * h],
        };
        if let Some((x0, y0, x1, y1)) = bar {
            for y in y0..y1 {
                for x in x0..x1 {
                    img.set(x, y, 220);
                }
            }
        }
        Frame::from_gray(img)
    }

    #[test]
    fn identical_frames_report_no_change() {
        let f = frame_with_bar(64, 64, None);
        let det = ChangeDetector::default();
        let status = det
            .detect_change(&f, &f, ViewId::Top, &IdentityRectifier)
            .unwrap();
        assert_eq!(status, ChangeStatus::NoChange);
    }

    #[test]
    fn new_bar_reports_change() {
        let prev = frame_with_bar(64, 64, None);
        let cur = frame_with_bar(64, 64, Some((10, 30, 50, 35)));
        let det = ChangeDetector::default();
        let status = det
            .detect_change(&prev, &cur, ViewId::Left, &IdentityRectifier)
            .unwrap();
        assert_eq!(status, ChangeStatus::Changed);
    }

    #[test]
    fn raised_threshold_suppresses_change() {
        let prev = frame_with_bar(64, 64, None);
        let cur = frame_with_bar(64, 64, Some((10, 30, 50, 35)));
        let mut det = ChangeDetector::default();
        det.set_diff_min_threshold(u64::MAX);
        let status = det
            .detect_change(&prev, &cur, ViewId::Left, &IdentityRectifier)
            .unwrap();
        assert_eq!(status, ChangeStatus::NoChange);
    }

    #[test]
    fn blob_fallback_catches_small_elongated_change() {
        let prev = frame_with_bar(64, 64, None);
        let cur = frame_with_bar(64, 64, Some((20, 30, 44, 32)));
        let mut det = ChangeDetector::new(
            DiffParams {
                blob_fallback: true,
                ..DiffParams::default()
            },
            BlobFilterParams::default(),
        );
        det.set_diff_min_threshold(u64::MAX);
        let status = det
            .detect_change(&prev, &cur, ViewId::Right, &IdentityRectifier)
            .unwrap();
        assert_eq!(status, ChangeStatus::Changed);
    }

    #[test]
    fn empty_frame_is_rejected() {
        let f = frame_with_bar(8, 8, None);
        let det = ChangeDetector::default();
        let err = det
            .detect_change(&Frame::empty(), &f, ViewId::Top, &IdentityRectifier)
            .unwrap_err();
        assert_eq!(err, FrameError::Empty { view: ViewId::Top });
    }
}

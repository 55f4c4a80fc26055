//! One throw, end to end: three frame pairs in, a voted sector out.

use std::sync::Arc;

use dart_vision_board::{resolve_views, vote, SectorResult, Vote};
use dart_vision_core::{Frame, FrameError, Point2, PolarLine, Rectifier, ViewId, ViewTriple};
use dart_vision_detect::{AxisError, AxisExtractor, ChangeDetector, ChangeMask, ChangeStatus};
use dart_vision_triangulate::{TriangulationError, TriangulationMethod, Triangulator};
use log::{debug, info};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::config::{PipelineParams, SharedParams};

/// Why a throw produced no score.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ThrowError {
    /// Precondition violation: the cycle is aborted loudly.
    #[error(transparent)]
    Frame(#[from] FrameError),
    #[error("axis extraction failed in view {view}: {source}")]
    Axis {
        view: ViewId,
        #[source]
        source: AxisError,
    },
    #[error("rectified views differ in size: {sizes:?}")]
    ProjectionMismatch { sizes: [(usize, usize); 3] },
    /// Neither the analytic nor the raster method found a landing point.
    #[error("throw unreadable: {0}")]
    Unreadable(#[from] TriangulationError),
}

impl ThrowError {
    /// `false` only for invalid input frames.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ThrowError::Frame(_))
    }
}

/// Everything learned about one throw.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThrowReport {
    pub lines: ViewTriple<PolarLine>,
    pub point: Point2<f32>,
    pub method: TriangulationMethod,
    pub per_view: ViewTriple<SectorResult>,
    pub vote: Vote,
}

impl ThrowReport {
    pub fn result(&self) -> &SectorResult {
        &self.vote.result
    }
}

/// Runs change detection and the full throw pipeline with the current params.
#[derive(Clone)]
pub struct ThrowProcessor {
    params: SharedParams,
    rectifier: Arc<dyn Rectifier>,
}

impl ThrowProcessor {
    pub fn new(params: SharedParams, rectifier: Arc<dyn Rectifier>) -> Self {
        Self { params, rectifier }
    }

    /// Rectifier taken from the params' calibration section.
    pub fn from_params(params: SharedParams) -> Self {
        let rectifier = params.snapshot().rectifier();
        Self::new(params, rectifier)
    }

    pub fn params(&self) -> &SharedParams {
        &self.params
    }

    /// Per-view change status. Any invalid frame rejects the whole triple.
    pub fn detect_change(
        &self,
        previous: &ViewTriple<Frame>,
        current: &ViewTriple<Frame>,
    ) -> Result<ViewTriple<ChangeStatus>, FrameError> {
        let p = self.params.snapshot();
        let masks = self.change_masks(&p, previous, current)?;
        Ok(classify(&p, &masks))
    }

    /// Extract three axes from the frame pairs, then triangulate and score.
    #[cfg_attr(feature = "tracing", instrument(level = "info", skip_all))]
    pub fn process(
        &self,
        previous: &ViewTriple<Frame>,
        current: &ViewTriple<Frame>,
    ) -> Result<ThrowReport, ThrowError> {
        let p = self.params.snapshot();
        let masks = self.change_masks(&p, previous, current)?;
        report_from_masks(&p, &masks)
    }

    /// One acquisition cycle: change detection and, when any view changed,
    /// the full pipeline on the same masks and the same params snapshot.
    ///
    /// `Ok(None)` means no view changed.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip_all))]
    pub fn detect_and_process(
        &self,
        previous: &ViewTriple<Frame>,
        current: &ViewTriple<Frame>,
    ) -> Result<Option<ThrowReport>, ThrowError> {
        let p = self.params.snapshot();
        let masks = self.change_masks(&p, previous, current)?;
        let status = classify(&p, &masks);
        if !status.iter().any(|(_, s)| s.is_changed()) {
            return Ok(None);
        }
        report_from_masks(&p, &masks).map(Some)
    }

    fn change_masks(
        &self,
        p: &PipelineParams,
        previous: &ViewTriple<Frame>,
        current: &ViewTriple<Frame>,
    ) -> Result<ViewTriple<ChangeMask>, FrameError> {
        ViewTriple::from_fn(|view| {
            ChangeMask::compute(
                view,
                previous.get(view),
                current.get(view),
                self.rectifier.as_ref(),
                &p.diff,
            )
        })
        .transpose()
    }

    /// Score three already-extracted lines in a `width × height` projection.
    pub fn score_lines(
        &self,
        lines: &ViewTriple<PolarLine>,
        width: usize,
        height: usize,
    ) -> Result<ThrowReport, ThrowError> {
        score_lines(&self.params.snapshot(), lines, width, height)
    }
}

fn classify(p: &PipelineParams, masks: &ViewTriple<ChangeMask>) -> ViewTriple<ChangeStatus> {
    let detector = ChangeDetector::new(p.diff.clone(), p.blob.clone());
    masks.each_ref().map(|mask| detector.classify(mask))
}

fn report_from_masks(
    p: &PipelineParams,
    masks: &ViewTriple<ChangeMask>,
) -> Result<ThrowReport, ThrowError> {
    let sizes = [&masks.top, &masks.right, &masks.left].map(|m| (m.width(), m.height()));
    if sizes.iter().any(|&s| s != sizes[0]) {
        return Err(ThrowError::ProjectionMismatch { sizes });
    }

    let extractor = AxisExtractor::new(p.axis.clone());
    let lines = ViewTriple::from_fn(|view| {
        extractor
            .fit_mask(masks.get(view))
            .map(|fit| fit.line)
            .map_err(|source| ThrowError::Axis { view, source })
    })
    .transpose()?;

    let (width, height) = sizes[0];
    score_lines(p, &lines, width, height)
}

fn score_lines(
    p: &PipelineParams,
    lines: &ViewTriple<PolarLine>,
    width: usize,
    height: usize,
) -> Result<ThrowReport, ThrowError> {
    for (view, line) in lines.iter() {
        debug!("view {view}: r {:.2} theta {:.4}", line.r, line.theta);
    }
    let triangulator = Triangulator::new(p.triangulation.clone(), width, height);
    let t = triangulator.triangulate_with_fallback(lines)?;

    let per_view = resolve_views(t.point, &p.board_for(width, height));
    let voted = vote(&per_view);
    info!(
        "throw at ({:.1}, {:.1}) via {:?}: {} ({:?})",
        t.point.x, t.point.y, t.method, voted.result, voted.agreement
    );
    Ok(ThrowReport {
        lines: *lines,
        point: t.point,
        method: t.method,
        per_view,
        vote: voted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dart_vision_core::{GrayImage, IdentityRectifier};

    fn processor() -> ThrowProcessor {
        ThrowProcessor::new(SharedParams::default(), Arc::new(IdentityRectifier))
    }

    fn blank(w: usize, h: usize) -> ViewTriple<Frame> {
        ViewTriple::from_fn(|_| Frame::from_gray(GrayImage::new(w, h)))
    }

    #[test]
    fn empty_frame_aborts_the_cycle() {
        let prev = blank(32, 32);
        let mut cur = blank(32, 32);
        cur.right = Frame::empty();
        let err = processor().process(&prev, &cur).unwrap_err();
        assert_eq!(err, ThrowError::Frame(FrameError::Empty { view: ViewId::Right }));
        assert!(!err.is_recoverable());
        assert!(processor().detect_change(&prev, &cur).is_err());
    }

    #[test]
    fn unchanged_views_fail_extraction_recoverably() {
        let prev = blank(32, 32);
        let err = processor().process(&prev, &prev).unwrap_err();
        assert!(matches!(err, ThrowError::Axis { view: ViewId::Top, .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn mismatched_projections_are_rejected() {
        let mut prev = blank(32, 32);
        let mut cur = blank(32, 32);
        prev.left = Frame::from_gray(GrayImage::new(40, 32));
        cur.left = Frame::from_gray(GrayImage::new(40, 32));
        let err = processor().process(&prev, &cur).unwrap_err();
        assert!(matches!(err, ThrowError::ProjectionMismatch { .. }));
    }
}

//! Pairwise line intersections and their robust centroid.

use dart_vision_core::{CartesianSegment, Point2, PolarLine, ViewTriple};
use serde::{Deserialize, Serialize};

/// Rectangle in which an intersection is accepted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorkingRect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl WorkingRect {
    pub fn canvas(width: usize, height: usize) -> Self {
        Self {
            x0: 0.0,
            y0: 0.0,
            x1: width as f32,
            y1: height as f32,
        }
    }

    pub fn from_array(r: [f32; 4]) -> Self {
        Self {
            x0: r[0],
            y0: r[1],
            x1: r[2],
            y1: r[3],
        }
    }

    #[inline]
    pub fn contains(&self, p: Point2<f32>) -> bool {
        p.x.is_finite()
            && p.y.is_finite()
            && p.x >= self.x0
            && p.x <= self.x1
            && p.y >= self.y0
            && p.y <= self.y1
    }
}

/// The three pairwise intersections; `None` marks a parallel pair, a line
/// missing the canvas, or a point outside the working rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PairwisePoints {
    pub top_right: Option<Point2<f32>>,
    pub top_left: Option<Point2<f32>>,
    pub left_right: Option<Point2<f32>>,
}

impl PairwisePoints {
    /// Points in tie-break order: top∩right, top∩left, left∩right.
    pub fn as_array(&self) -> [Option<Point2<f32>>; 3] {
        [self.top_right, self.top_left, self.left_right]
    }

    pub fn valid_count(&self) -> usize {
        self.as_array().iter().flatten().count()
    }
}

pub fn pairwise_intersections(
    lines: &ViewTriple<PolarLine>,
    width: usize,
    height: usize,
    working: &WorkingRect,
) -> PairwisePoints {
    let segs: ViewTriple<Option<CartesianSegment>> =
        lines.each_ref().map(|l| l.clip_to_rect(width, height));

    let meet = |a: &Option<CartesianSegment>, b: &Option<CartesianSegment>| {
        let p = a.as_ref()?.intersect_lines(b.as_ref()?)?;
        working.contains(p).then_some(p)
    };

    PairwisePoints {
        top_right: meet(&segs.top, &segs.right),
        top_left: meet(&segs.top, &segs.left),
        left_right: meet(&segs.left, &segs.right),
    }
}

/// How the consensus point was formed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsensusKind {
    /// Average of three mutually consistent points.
    AllThree,
    /// One outlier (index in tie-break order) discarded, remaining two averaged.
    OutlierDiscarded { index: usize },
    /// Only two points were valid; averaged.
    TwoValid,
    /// Only one point was valid.
    Single,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Consensus {
    pub point: Point2<f32>,
    pub kind: ConsensusKind,
}

fn mean(points: &[Point2<f32>]) -> Point2<f32> {
    let n = points.len() as f32;
    let s = points.iter().fold(nalgebra::Vector2::zeros(), |acc, p| acc + p.coords);
    Point2::from(s / n)
}

/// Robust centroid of up to three pairwise points.
///
/// With three valid points, the first point (in tie-break order) farther
/// than `eps` from both others is discarded and the other two averaged. At
/// most one point is ever discarded, so three mutually distant points still
/// produce the mean of the last two. With no outlier all three are averaged.
pub fn robust_centroid(points: [Option<Point2<f32>>; 3], eps: f32) -> Option<Consensus> {
    let valid: Vec<Point2<f32>> = points.iter().flatten().copied().collect();
    match valid.len() {
        0 => None,
        1 => Some(Consensus {
            point: valid[0],
            kind: ConsensusKind::Single,
        }),
        2 => Some(Consensus {
            point: mean(&valid),
            kind: ConsensusKind::TwoValid,
        }),
        _ => {
            let far = |i: usize, j: usize| (valid[i] - valid[j]).norm() > eps;
            for i in 0..3 {
                let (j, k) = ((i + 1) % 3, (i + 2) % 3);
                if far(i, j) && far(i, k) {
                    let kept = [valid[j], valid[k]];
                    return Some(Consensus {
                        point: mean(&kept),
                        kind: ConsensusKind::OutlierDiscarded { index: i },
                    });
                }
            }
            Some(Consensus {
                point: mean(&valid),
                kind: ConsensusKind::AllThree,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::PI;

    fn p(x: f32, y: f32) -> Option<Point2<f32>> {
        Some(Point2::new(x, y))
    }

    #[test]
    fn three_close_points_are_averaged() {
        let c = robust_centroid([p(0.0, 0.0), p(3.0, 0.0), p(0.0, 3.0)], 120.0).unwrap();
        assert_eq!(c.kind, ConsensusKind::AllThree);
        assert_abs_diff_eq!(c.point.x, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(c.point.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn single_outlier_is_discarded() {
        let c = robust_centroid([p(10.0, 10.0), p(500.0, 500.0), p(14.0, 10.0)], 120.0).unwrap();
        assert_eq!(c.kind, ConsensusKind::OutlierDiscarded { index: 1 });
        assert_abs_diff_eq!(c.point.x, 12.0, epsilon = 1e-6);
        assert_abs_diff_eq!(c.point.y, 10.0, epsilon = 1e-6);
    }

    #[test]
    fn mutually_distant_points_discard_only_the_first() {
        let c = robust_centroid([p(0.0, 0.0), p(300.0, 0.0), p(0.0, 300.0)], 120.0).unwrap();
        assert_eq!(c.kind, ConsensusKind::OutlierDiscarded { index: 0 });
        assert_abs_diff_eq!(c.point.x, 150.0, epsilon = 1e-6);
        assert_abs_diff_eq!(c.point.y, 150.0, epsilon = 1e-6);
    }

    #[test]
    fn chain_of_neighbours_is_not_an_outlier() {
        // 0 is near 1, 1 is near 2, 0 is far from 2: nobody is far from both
        let c = robust_centroid([p(0.0, 0.0), p(100.0, 0.0), p(200.0, 0.0)], 120.0).unwrap();
        assert_eq!(c.kind, ConsensusKind::AllThree);
        assert_abs_diff_eq!(c.point.x, 100.0, epsilon = 1e-6);
    }

    #[test]
    fn partial_and_empty_inputs() {
        let c = robust_centroid([None, p(4.0, 4.0), p(8.0, 0.0)], 1.0).unwrap();
        assert_eq!(c.kind, ConsensusKind::TwoValid);
        assert_abs_diff_eq!(c.point.x, 6.0, epsilon = 1e-6);
        let c = robust_centroid([None, None, p(8.0, 0.0)], 1.0).unwrap();
        assert_eq!(c.kind, ConsensusKind::Single);
        assert!(robust_centroid([None, None, None], 1.0).is_none());
    }

    #[test]
    fn pairwise_points_respect_working_rect() {
        // vertical at x = 230, horizontal at y = 150, diagonal through (230, 150)
        let lines = ViewTriple::new(
            PolarLine::new(30.0, 0.0),
            PolarLine::new(-50.0, 0.5 * PI),
            PolarLine::through(
                Point2::new(180.0, 100.0),
                Point2::new(280.0, 200.0),
                Point2::new(200.0, 200.0),
            )
            .unwrap(),
        );
        let all = pairwise_intersections(&lines, 400, 400, &WorkingRect::canvas(400, 400));
        assert_eq!(all.valid_count(), 3);
        for q in all.as_array().into_iter().flatten() {
            assert_abs_diff_eq!(q.x, 230.0, epsilon = 1e-2);
            assert_abs_diff_eq!(q.y, 150.0, epsilon = 1e-2);
        }

        let tight = WorkingRect::from_array([0.0, 0.0, 200.0, 200.0]);
        let none = pairwise_intersections(&lines, 400, 400, &tight);
        assert_eq!(none.valid_count(), 0);
    }
}

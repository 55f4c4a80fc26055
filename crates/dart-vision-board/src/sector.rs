//! Per-view sector scoring.

use dart_vision_core::{Point2, ViewTriple};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geometry::BoardGeometry;

/// Radial ring of the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ring {
    Bullseye,
    SingleBull,
    InnerSingle,
    Triple,
    OuterSingle,
    Double,
    Out,
}

impl Ring {
    /// Ring containing a point at `distance` from the center.
    pub fn at(distance: f32, geometry: &BoardGeometry) -> Self {
        let r = &geometry.radii;
        if distance <= r.bullseye {
            Ring::Bullseye
        } else if distance <= r.single_bull {
            Ring::SingleBull
        } else if distance <= r.triple_inner {
            Ring::InnerSingle
        } else if distance <= r.triple_outer {
            Ring::Triple
        } else if distance <= r.double_inner {
            Ring::OuterSingle
        } else if distance <= r.double_outer {
            Ring::Double
        } else {
            Ring::Out
        }
    }

    /// Multiplier applied to the wedge number; `None` for the bull rings and
    /// off-board, which score a fixed value.
    pub fn multiplier(self) -> Option<u32> {
        match self {
            Ring::InnerSingle | Ring::OuterSingle => Some(1),
            Ring::Triple => Some(3),
            Ring::Double => Some(2),
            Ring::Bullseye | Ring::SingleBull | Ring::Out => None,
        }
    }
}

/// Score of one view's interpretation of a landing point.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SectorResult {
    pub value: u32,
    pub label: String,
}

impl SectorResult {
    pub fn bullseye() -> Self {
        Self {
            value: 50,
            label: "Bullseye".to_string(),
        }
    }

    pub fn single_bull() -> Self {
        Self {
            value: 25,
            label: "Single Bull".to_string(),
        }
    }

    pub fn out_of_board() -> Self {
        Self {
            value: 0,
            label: "Out of Board".to_string(),
        }
    }

    /// `Single N`, `Double N` or `Triple N`; any other multiplier is rejected.
    pub fn wedge(number: u8, multiplier: u32) -> Option<Self> {
        let word = match multiplier {
            1 => "Single",
            2 => "Double",
            3 => "Triple",
            _ => return None,
        };
        if !(1..=20).contains(&number) {
            return None;
        }
        Some(Self {
            value: number as u32 * multiplier,
            label: format!("{word} {number}"),
        })
    }

    pub fn is_double(&self) -> bool {
        self.label.starts_with("Double")
    }
}

impl fmt::Display for SectorResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.value)
    }
}

/// Angle of `(dx, dy)` in degrees, clockwise from 12 o'clock, in `[0, 360)`.
/// Image coordinates: y grows downward.
#[inline]
fn clockwise_from_up_deg(dx: f32, dy: f32) -> f32 {
    dx.atan2(-dy).to_degrees().rem_euclid(360.0)
}

/// Score `point` against one view's board geometry. Pure function.
pub fn resolve_sector(point: Point2<f32>, geometry: &BoardGeometry) -> SectorResult {
    let d = point - geometry.center;
    let distance = d.norm();
    let ring = Ring::at(distance, geometry);

    let result = match ring {
        Ring::Bullseye => Some(SectorResult::bullseye()),
        Ring::SingleBull => Some(SectorResult::single_bull()),
        Ring::Out => Some(SectorResult::out_of_board()),
        _ => {
            // a point straight above or below the center is nudged one unit
            let dx = if d.x == 0.0 { 1.0 } else { d.x };
            let number = geometry.wedge_number(clockwise_from_up_deg(dx, d.y));
            ring.multiplier().and_then(|m| SectorResult::wedge(number, m))
        }
    };
    result.unwrap_or_else(SectorResult::out_of_board)
}

/// Score one point against each view's geometry.
pub fn resolve_views(
    point: Point2<f32>,
    geometry: &ViewTriple<BoardGeometry>,
) -> ViewTriple<SectorResult> {
    geometry.each_ref().map(|g| resolve_sector(point, g))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> BoardGeometry {
        BoardGeometry::standard(Point2::new(200.0, 200.0), 1.0)
    }

    fn at(distance: f32, angle_deg: f32) -> Point2<f32> {
        let a = angle_deg.to_radians();
        Point2::new(200.0 + distance * a.sin(), 200.0 - distance * a.cos())
    }

    #[test]
    fn center_is_bullseye() {
        assert_eq!(
            resolve_sector(Point2::new(200.0, 200.0), &board()),
            SectorResult::bullseye()
        );
        assert_eq!(resolve_sector(at(10.0, 123.0), &board()).value, 25);
    }

    #[test]
    fn rings_and_wedges() {
        let g = board();
        let cases = [
            (50.0, 0.0, "Single 20", 20),
            (103.0, 0.0, "Triple 20", 60),
            (103.0, 180.0, "Triple 3", 9),
            (103.0, 198.0, "Triple 19", 57),
            (130.0, 90.0, "Single 6", 6),
            (166.0, 270.0, "Double 11", 22),
            (166.0, 18.0, "Double 1", 2),
            (200.0, 45.0, "Out of Board", 0),
        ];
        for (dist, ang, label, value) in cases {
            let r = resolve_sector(at(dist, ang + 4.0), &g);
            assert_eq!(r.label, label, "dist {dist} angle {ang}");
            assert_eq!(r.value, value, "dist {dist} angle {ang}");
        }
    }

    #[test]
    fn vertical_offset_is_nudged_not_degenerate() {
        let g = board();
        assert_eq!(resolve_sector(Point2::new(200.0, 70.0), &g).label, "Single 20");
        assert_eq!(resolve_sector(Point2::new(200.0, 330.0), &g).label, "Single 3");
    }

    #[test]
    fn values_stay_in_closed_set() {
        let g = board();
        let allowed = |v: u32| {
            v == 0 || v == 25 || v == 50 || (1..=20).any(|n| v == n || v == 2 * n || v == 3 * n)
        };
        for step in 0..720 {
            let ang = step as f32 * 0.5;
            for dist in [0.0, 5.0, 12.0, 60.0, 100.0, 106.5, 140.0, 165.0, 169.9, 171.0, 400.0] {
                let r = resolve_sector(at(dist, ang), &g);
                assert!(allowed(r.value), "{r} at {dist}/{ang}");
            }
        }
    }

    #[test]
    fn repeated_calls_agree() {
        let g = board().with_orientation(-3.0);
        let p = Point2::new(287.3, 144.1);
        assert_eq!(resolve_sector(p, &g), resolve_sector(p, &g));
    }

    #[test]
    fn wedge_constructor_rejects_bad_input() {
        assert!(SectorResult::wedge(0, 1).is_none());
        assert!(SectorResult::wedge(21, 1).is_none());
        assert!(SectorResult::wedge(5, 4).is_none());
        assert_eq!(SectorResult::wedge(19, 3).unwrap().label, "Triple 19");
    }
}

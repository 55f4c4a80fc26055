use dart_vision_core::Point2;
use serde::{Deserialize, Serialize};

/// Wedge number of each 9° half-sector, clockwise from 12 o'clock.
///
/// Entry `k` covers angles `[9k, 9k + 9)`; the "20" wedge straddles 0° and
/// therefore occupies the first and the last entry.
pub const HALF_SECTOR_NUMBERS: [u8; 40] = [
    20, 1, 1, 18, 18, 4, 4, 13, 13, 6, 6, 10, 10, 15, 15, 2, 2, 17, 17, 3, 3, 19, 19, 7, 7, 16, 16,
    8, 8, 11, 11, 14, 14, 9, 9, 12, 12, 5, 5, 20,
];

/// Outer radius of each ring, innermost first, in board-projection pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardRadii {
    pub bullseye: f32,
    pub single_bull: f32,
    pub triple_inner: f32,
    pub triple_outer: f32,
    pub double_inner: f32,
    pub double_outer: f32,
}

impl BoardRadii {
    /// Regulation board, in millimetres.
    pub const REGULATION_MM: BoardRadii = BoardRadii {
        bullseye: 6.35,
        single_bull: 15.9,
        triple_inner: 99.0,
        triple_outer: 107.0,
        double_inner: 162.0,
        double_outer: 170.0,
    };

    pub fn scaled(&self, k: f32) -> Self {
        Self {
            bullseye: self.bullseye * k,
            single_bull: self.single_bull * k,
            triple_inner: self.triple_inner * k,
            triple_outer: self.triple_outer * k,
            double_inner: self.double_inner * k,
            double_outer: self.double_outer * k,
        }
    }

    pub fn as_array(&self) -> [f32; 6] {
        [
            self.bullseye,
            self.single_bull,
            self.triple_inner,
            self.triple_outer,
            self.double_inner,
            self.double_outer,
        ]
    }

    /// Radii strictly increasing and positive.
    pub fn is_valid(&self) -> bool {
        let r = self.as_array();
        r[0] > 0.0 && r.windows(2).all(|w| w[0] < w[1])
    }
}

/// Per-view board description in the rectified projection. Immutable once built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardGeometry {
    pub center: Point2<f32>,
    pub radii: BoardRadii,
    /// Clockwise rotation of the "20" wedge away from 12 o'clock, in degrees.
    #[serde(default)]
    pub orientation_deg: f32,
}

impl BoardGeometry {
    pub fn new(center: Point2<f32>, radii: BoardRadii) -> Self {
        Self {
            center,
            radii,
            orientation_deg: 0.0,
        }
    }

    /// Regulation board at `center`, scaled by `px_per_mm`.
    pub fn standard(center: Point2<f32>, px_per_mm: f32) -> Self {
        Self::new(center, BoardRadii::REGULATION_MM.scaled(px_per_mm))
    }

    /// Regulation board centered on a `width × height` projection, scaled so
    /// the double ring touches the shorter side.
    pub fn fit_to_canvas(width: usize, height: usize) -> Self {
        let center = Point2::new(0.5 * width as f32, 0.5 * height as f32);
        let px_per_mm = 0.5 * width.min(height) as f32 / BoardRadii::REGULATION_MM.double_outer;
        Self::standard(center, px_per_mm)
    }

    pub fn with_orientation(mut self, orientation_deg: f32) -> Self {
        self.orientation_deg = orientation_deg;
        self
    }

    /// Wedge number for an angle in degrees clockwise from 12 o'clock.
    pub fn wedge_number(&self, angle_deg: f32) -> u8 {
        let a = (angle_deg - self.orientation_deg).rem_euclid(360.0);
        let k = ((a / 9.0).floor() as usize).min(HALF_SECTOR_NUMBERS.len() - 1);
        HALF_SECTOR_NUMBERS[k]
    }
}

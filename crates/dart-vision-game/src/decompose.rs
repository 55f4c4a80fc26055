use dart_vision_board::SectorResult;
use serde::{Deserialize, Serialize};

/// `(ring multiplier, base value)` split of a single dart, as sent to an
/// external reporting service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrowDecomposition {
    pub multiplier: u32,
    pub value: u32,
}

impl ThrowDecomposition {
    /// Split on the label's leading character (`S`, `D`, `T`).
    ///
    /// `Bullseye` is a double 25 and `Out of Board` is `(0, 0)`. Unknown
    /// labels yield `None`.
    pub fn from_result(result: &SectorResult) -> Option<Self> {
        let multiplier = match result.label.chars().next()? {
            'S' => 1,
            'D' => 2,
            'T' => 3,
            'B' => 2,
            'O' => {
                return Some(Self {
                    multiplier: 0,
                    value: 0,
                })
            }
            _ => return None,
        };
        Some(Self {
            multiplier,
            value: result.value / multiplier,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decomposes_every_ring() {
        let d = |r: SectorResult| ThrowDecomposition::from_result(&r).unwrap();
        let t19 = d(SectorResult::wedge(19, 3).unwrap());
        assert_eq!((t19.multiplier, t19.value), (3, 19));
        let d16 = d(SectorResult::wedge(16, 2).unwrap());
        assert_eq!((d16.multiplier, d16.value), (2, 16));
        let bull = d(SectorResult::single_bull());
        assert_eq!((bull.multiplier, bull.value), (1, 25));
        let eye = d(SectorResult::bullseye());
        assert_eq!((eye.multiplier, eye.value), (2, 25));
        let out = d(SectorResult::out_of_board());
        assert_eq!((out.multiplier, out.value), (0, 0));
    }

    #[test]
    fn unknown_label_is_rejected() {
        let r = SectorResult {
            value: 7,
            label: "?".into(),
        };
        assert!(ThrowDecomposition::from_result(&r).is_none());
    }
}

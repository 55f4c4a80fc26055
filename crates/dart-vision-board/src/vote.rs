//! Majority vote over the three per-view sector results.

use dart_vision_core::ViewTriple;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::sector::SectorResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Agreement {
    Unanimous,
    Majority,
    /// All three differ; the top view was used.
    Disagreement,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub result: SectorResult,
    pub agreement: Agreement,
}

/// Pick the final result.
///
/// Any two matching views win. When all three differ, the top view's result
/// is used and a warning is logged.
pub fn vote(results: &ViewTriple<SectorResult>) -> Vote {
    let ViewTriple { top, right, left } = results;
    let (result, agreement) = if top == right && top == left {
        (top, Agreement::Unanimous)
    } else if top == right || top == left {
        (top, Agreement::Majority)
    } else if right == left {
        (right, Agreement::Majority)
    } else {
        warn!(
            "views disagree (top {}, right {}, left {}); using top",
            top.label, right.label, left.label
        );
        (top, Agreement::Disagreement)
    };
    Vote {
        result: result.clone(),
        agreement,
    }
}

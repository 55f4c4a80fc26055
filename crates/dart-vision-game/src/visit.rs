//! Up to three darts forming one visit.

use dart_vision_board::SectorResult;
use serde::{Deserialize, Serialize};

use crate::params::CheckoutRule;

pub const DARTS_PER_VISIT: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitStatus {
    Open,
    Complete,
}

/// Darts of the current visit, in throw order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visit {
    darts: Vec<SectorResult>,
}

impl Visit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a dart. The visit completes after three darts, or earlier once
    /// the running total reaches `remaining` or busts under `rule`.
    pub fn push(
        &mut self,
        dart: SectorResult,
        remaining: u32,
        rule: CheckoutRule,
    ) -> VisitStatus {
        self.darts.push(dart);
        let total = self.total();
        if self.darts.len() >= DARTS_PER_VISIT
            || total >= remaining
            || rule.busts(remaining, total)
        {
            VisitStatus::Complete
        } else {
            VisitStatus::Open
        }
    }

    pub fn total(&self) -> u32 {
        self.darts.iter().map(|d| d.value).sum()
    }

    pub fn last_label(&self) -> Option<&str> {
        self.darts.last().map(|d| d.label.as_str())
    }

    pub fn darts(&self) -> &[SectorResult] {
        &self.darts
    }

    pub fn len(&self) -> usize {
        self.darts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.darts.is_empty()
    }

    /// Hand back the finished visit and start a new one.
    pub fn take(&mut self) -> Visit {
        std::mem::take(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dart(n: u8, m: u32) -> SectorResult {
        SectorResult::wedge(n, m).unwrap()
    }

    #[test]
    fn three_darts_complete_a_visit() {
        let mut v = Visit::new();
        assert_eq!(v.push(dart(20, 3), 501, CheckoutRule::Double), VisitStatus::Open);
        assert_eq!(v.push(dart(20, 1), 501, CheckoutRule::Double), VisitStatus::Open);
        assert_eq!(v.push(dart(20, 1), 501, CheckoutRule::Double), VisitStatus::Complete);
        assert_eq!(v.total(), 100);
        assert_eq!(v.last_label(), Some("Single 20"));

        let done = v.take();
        assert_eq!(done.len(), 3);
        assert!(v.is_empty());
    }

    #[test]
    fn reaching_the_remaining_score_ends_early() {
        let mut v = Visit::new();
        assert_eq!(v.push(dart(20, 2), 40, CheckoutRule::Double), VisitStatus::Complete);
        assert_eq!(v.last_label(), Some("Double 20"));

        let mut v = Visit::new();
        assert_eq!(v.push(dart(19, 3), 50, CheckoutRule::Double), VisitStatus::Complete);
    }

    #[test]
    fn leaving_one_closes_the_visit_under_a_double_rule() {
        let mut v = Visit::new();
        assert_eq!(v.push(dart(19, 1), 40, CheckoutRule::Double), VisitStatus::Open);
        assert_eq!(v.push(dart(20, 1), 40, CheckoutRule::Double), VisitStatus::Complete);

        let mut v = Visit::new();
        assert_eq!(v.push(dart(19, 1), 40, CheckoutRule::Any), VisitStatus::Open);
        assert_eq!(v.push(dart(20, 1), 40, CheckoutRule::Any), VisitStatus::Open);
    }
}

//! The three fixed camera views and per-view value triples.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three fixed camera perspectives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewId {
    Top,
    Right,
    Left,
}

impl ViewId {
    /// All views in processing order.
    pub const ALL: [ViewId; 3] = [ViewId::Top, ViewId::Right, ViewId::Left];

    pub fn as_str(self) -> &'static str {
        match self {
            ViewId::Top => "top",
            ViewId::Right => "right",
            ViewId::Left => "left",
        }
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered `{top, right, left}` triple; all three members are always present.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewTriple<T> {
    pub top: T,
    pub right: T,
    pub left: T,
}

impl<T> ViewTriple<T> {
    pub fn new(top: T, right: T, left: T) -> Self {
        Self { top, right, left }
    }

    /// Build a triple by evaluating `f` once per view, in `ViewId::ALL` order.
    pub fn from_fn(mut f: impl FnMut(ViewId) -> T) -> Self {
        let top = f(ViewId::Top);
        let right = f(ViewId::Right);
        let left = f(ViewId::Left);
        Self { top, right, left }
    }

    pub fn get(&self, view: ViewId) -> &T {
        match view {
            ViewId::Top => &self.top,
            ViewId::Right => &self.right,
            ViewId::Left => &self.left,
        }
    }

    pub fn get_mut(&mut self, view: ViewId) -> &mut T {
        match view {
            ViewId::Top => &mut self.top,
            ViewId::Right => &mut self.right,
            ViewId::Left => &mut self.left,
        }
    }

    pub fn each_ref(&self) -> ViewTriple<&T> {
        ViewTriple {
            top: &self.top,
            right: &self.right,
            left: &self.left,
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> ViewTriple<U> {
        ViewTriple {
            top: f(self.top),
            right: f(self.right),
            left: f(self.left),
        }
    }

    /// Iterate `(view, value)` pairs in `ViewId::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (ViewId, &T)> {
        ViewId::ALL.into_iter().map(move |v| (v, self.get(v)))
    }
}

impl<T, E> ViewTriple<Result<T, E>> {
    /// Turn a triple of results into a result of a triple; the first error
    /// in view order wins.
    pub fn transpose(self) -> Result<ViewTriple<T>, E> {
        Ok(ViewTriple {
            top: self.top?,
            right: self.right?,
            left: self.left?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_fn_visits_views_in_order() {
        let mut seen = Vec::new();
        let t = ViewTriple::from_fn(|v| {
            seen.push(v);
            v.as_str().len()
        });
        assert_eq!(seen, ViewId::ALL.to_vec());
        assert_eq!(t, ViewTriple::new(3, 5, 4));
    }

    #[test]
    fn transpose_reports_first_error() {
        let t: ViewTriple<Result<u8, &str>> = ViewTriple::new(Ok(1), Err("right"), Err("left"));
        assert_eq!(t.transpose(), Err("right"));
    }
}

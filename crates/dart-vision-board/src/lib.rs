//! Dartboard scoring for a triangulated landing point.
//!
//! [`resolve_sector`] scores a point against one view's [`BoardGeometry`];
//! [`vote`] reconciles the three per-view results.

mod geometry;
mod sector;
mod vote;

pub use geometry::{BoardGeometry, BoardRadii, HALF_SECTOR_NUMBERS};
pub use sector::{resolve_sector, resolve_views, Ring, SectorResult};
pub use vote::{vote, Agreement, Vote};

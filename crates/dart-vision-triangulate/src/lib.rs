//! Three-view triangulation of a dart landing point.
//!
//! Input is one [`PolarLine`](dart_vision_core::PolarLine) per view, all in
//! the same board projection. [`Triangulator::triangulate`] intersects the
//! lines pairwise and forms a robust centroid;
//! [`Triangulator::triangulate_graphical`] rasterizes them additively and
//! averages the bright overlap. [`Triangulator::triangulate_with_fallback`]
//! chains the two.

mod analytic;
mod error;
pub mod graphical;
mod params;
mod triangulator;

pub use analytic::{
    pairwise_intersections, robust_centroid, Consensus, ConsensusKind, PairwisePoints, WorkingRect,
};
pub use error::TriangulationError;
pub use params::TriangulationParams;
pub use triangulator::{Triangulation, TriangulationMethod, Triangulator};

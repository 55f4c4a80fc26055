/// Errors returned by the triangulator.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriangulationError {
    /// No pairwise intersection survived (all parallel or out of the working rectangle).
    #[error("no valid pairwise intersection")]
    NoIntersection,
    /// The raster method found no pixel above the intersection threshold.
    #[error("no accumulated overlap above threshold {threshold}")]
    NoOverlap { threshold: u8 },
}

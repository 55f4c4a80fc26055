//! "501"-style scoring on top of per-dart [`SectorResult`](dart_vision_board::SectorResult)s.
//!
//! [`GameState::apply_throw`] takes a visit total and the last dart's label
//! and returns a [`ThrowOutcome`]. Busts and failed checkouts are outcomes,
//! not errors: the score is left unchanged and the turn passes.

mod decompose;
mod error;
mod params;
mod state;
mod visit;

pub use decompose::ThrowDecomposition;
pub use error::GameError;
pub use params::{CheckoutRule, GameParams};
pub use state::{GameState, PlayerState, ThrowOutcome};
pub use visit::{Visit, VisitStatus};

//! High-level facade crate for the `dart-vision-*` workspace.
//!
//! This crate provides:
//! - re-exports of the stage crates (frames and geometry, detection,
//!   triangulation, board scoring, game rules);
//! - [`ThrowProcessor`], which turns three previous/current frame pairs into
//!   one voted [`SectorResult`](board::SectorResult);
//! - live-tunable configuration ([`SharedParams`]) and the acquisition and
//!   scoring loops of [`runtime`];
//! - (feature `image`) loading frames from image files.
//!
//! ## Quickstart
//!
//! ```
//! use std::sync::Arc;
//! use dart_vision::core::{IdentityRectifier, PolarLine, ViewTriple};
//! use dart_vision::{SharedParams, ThrowProcessor};
//!
//! let processor = ThrowProcessor::new(SharedParams::default(), Arc::new(IdentityRectifier));
//! // three views agreeing on a vertical line through the board center
//! let lines = ViewTriple::from_fn(|_| PolarLine::new(0.0, 0.0));
//! let report = processor.score_lines(&lines, 400, 400).unwrap();
//! assert_eq!(report.result().label, "Bullseye");
//! ```
//!
//! ## API map
//! - `dart_vision::core`: frames, gray images, views, polar lines, homographies.
//! - `dart_vision::detect`: frame differencing and dart axis extraction.
//! - `dart_vision::triangulate`: analytic and raster triangulation.
//! - `dart_vision::board`: board geometry, sector scoring, voting.
//! - `dart_vision::game`: the 501 state machine.
//! - `dart_vision::io` (feature `image`): frames from `image` crate types.

pub use dart_vision_board as board;
pub use dart_vision_core as core;
pub use dart_vision_detect as detect;
pub use dart_vision_game as game;
pub use dart_vision_triangulate as triangulate;

pub mod config;
pub mod pipeline;
pub mod runtime;

#[cfg(feature = "image")]
pub mod io;

pub use config::{ConfigError, PipelineParams, RectifyParams, SharedParams};
pub use pipeline::{ThrowError, ThrowProcessor, ThrowReport};
pub use runtime::{
    run_acquisition, run_scoring, AcquisitionStats, AsyncReporter, FramePoll, FrameSource,
    ReportError, ResultSlot, RunFlag, Scoreboard, Scorer, ThrowReporter,
};

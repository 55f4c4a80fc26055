//! Per-view dart detection on top of `dart-vision-core`.
//!
//! ## Quickstart
//!
//! ```
//! use dart_vision_core::{Frame, GrayImage, IdentityRectifier, ViewId};
//! use dart_vision_detect::{ChangeDetector, ChangeStatus};
//!
//! let frame = Frame::from_gray(GrayImage::new(64, 64));
//! let detector = ChangeDetector::default();
//! let status = detector
//!     .detect_change(&frame, &frame, ViewId::Top, &IdentityRectifier)
//!     .unwrap();
//! assert_eq!(status, ChangeStatus::NoChange);
//! ```
//!
//! Two stages share one preprocessing chain ([`ChangeMask`]):
//! - [`ChangeDetector`] sums the binary change mask against a threshold
//!   (with an optional connected-component fallback);
//! - [`AxisExtractor`] localizes the dart in the mask and fits its axis with
//!   a coarse PCA followed by a narrow, axis-aligned refinement PCA.

mod axis;
mod blob;
mod change;
mod error;
pub mod filters;
mod params;
mod pca;

pub use axis::{AxisExtractor, AxisFit, Region};
pub use blob::{find_blobs, Blob};
pub use change::{ChangeDetector, ChangeMask, ChangeStatus};
pub use error::AxisError;
pub use params::{AxisParams, BlobFilterParams, DiffParams};
pub use pca::{principal_axis, PrincipalAxis};

//! Core types for three-camera dart triangulation.
//!
//! This crate is intentionally small and purely geometric: frames and gray
//! images, the three camera views, polar lines relative to an image center,
//! and the homography warp that brings every view into one top-down board
//! projection. It does not know about dartboards or scoring.

mod frame;
mod homography;
mod image;
mod line;
mod logger;
mod rectify;
mod view;

pub use frame::{Frame, FrameError, PixelFormat};
pub use homography::{homography_from_4pt, warp_perspective_gray, Homography};
pub use image::{sample_bilinear, sample_bilinear_u8, GrayImage, GrayImageView};
pub use line::{wrap_angle_pi, CartesianSegment, PolarLine};
pub use rectify::{HomographyRectifier, IdentityRectifier, Rectifier};
pub use view::{ViewId, ViewTriple};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;

/// Re-exported so downstream crates name points with the same type.
pub use nalgebra::Point2;

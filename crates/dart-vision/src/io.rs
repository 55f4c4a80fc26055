//! `image` crate adapters.

use std::path::Path;

use dart_vision_core::{Frame, GrayImageView, PixelFormat};

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("failed to load {path}: {source}")]
    Image {
        path: String,
        #[source]
        source: ::image::ImageError,
    },
    #[error(transparent)]
    Frame(#[from] dart_vision_core::FrameError),
}

/// Convert a decoded image into a [`Frame`], keeping gray images single-channel.
pub fn frame_from_image(img: &::image::DynamicImage) -> Result<Frame, LoadError> {
    let (w, h) = (img.width() as usize, img.height() as usize);
    let frame = if img.color().has_color() {
        Frame::new(w, h, PixelFormat::Rgb8, img.to_rgb8().into_raw())?
    } else {
        Frame::new(w, h, PixelFormat::Gray8, img.to_luma8().into_raw())?
    };
    Ok(frame)
}

pub fn load_frame(path: impl AsRef<Path>) -> Result<Frame, LoadError> {
    let path = path.as_ref();
    let img = ::image::open(path).map_err(|source| LoadError::Image {
        path: path.display().to_string(),
        source,
    })?;
    frame_from_image(&img)
}

/// Borrow an `image::GrayImage` as the lightweight core view type.
pub fn gray_view(img: &::image::GrayImage) -> GrayImageView<'_> {
    GrayImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

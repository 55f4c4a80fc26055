use crate::{GrayImage, ViewId};

/// Pixel layout of a captured [`Frame`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    Gray8,
    Rgb8,
}

impl PixelFormat {
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::Gray8 => 1,
            PixelFormat::Rgb8 => 3,
        }
    }
}

/// Errors for frames that cannot enter the pipeline.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("empty or unavailable frame for view {view}")]
    Empty { view: ViewId },
    #[error("frame size mismatch for view {view}: previous {prev_w}x{prev_h}, current {cur_w}x{cur_h}")]
    SizeMismatch {
        view: ViewId,
        prev_w: usize,
        prev_h: usize,
        cur_w: usize,
        cur_h: usize,
    },
    #[error("invalid frame buffer length (expected {expected} bytes, got {got})")]
    BufferLength { expected: usize, got: usize },
}

/// One camera image at one instant. Immutable once captured.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub width: usize,
    pub height: usize,
    pub format: PixelFormat,
    data: Vec<u8>,
}

impl Frame {
    pub fn new(
        width: usize,
        height: usize,
        format: PixelFormat,
        data: Vec<u8>,
    ) -> Result<Self, FrameError> {
        let expected = width * height * format.channels();
        if data.len() != expected {
            return Err(FrameError::BufferLength {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            format,
            data,
        })
    }

    /// A frame explicitly flagged as unavailable by the acquisition side.
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            format: PixelFormat::Gray8,
            data: Vec::new(),
        }
    }

    pub fn from_gray(img: GrayImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            format: PixelFormat::Gray8,
            data: img.data,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.data.is_empty()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Grayscale copy using integer BT.601 luma weights.
    pub fn to_gray(&self) -> GrayImage {
        let data = match self.format {
            PixelFormat::Gray8 => self.data.clone(),
            PixelFormat::Rgb8 => self
                .data
                .chunks_exact(3)
                .map(|px| {
                    let (r, g, b) = (px[0] as u32, px[1] as u32, px[2] as u32);
                    ((299 * r + 587 * g + 114 * b + 500) / 1000) as u8
                })
                .collect(),
        };
        GrayImage {
            width: self.width,
            height: self.height,
            data,
        }
    }

    /// Reject an empty frame or a previous/current pair of different sizes.
    pub fn check_pair(view: ViewId, previous: &Frame, current: &Frame) -> Result<(), FrameError> {
        if previous.is_empty() || current.is_empty() {
            return Err(FrameError::Empty { view });
        }
        if previous.width != current.width || previous.height != current.height {
            return Err(FrameError::SizeMismatch {
                view,
                prev_w: previous.width,
                prev_h: previous.height,
                cur_w: current.width,
                cur_h: current.height,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_to_gray_uses_luma_weights() {
        let f = Frame::new(2, 1, PixelFormat::Rgb8, vec![255, 255, 255, 255, 0, 0]).unwrap();
        let g = f.to_gray();
        assert_eq!(g.data, vec![255, 76]);
    }

    #[test]
    fn buffer_length_is_validated() {
        let err = Frame::new(2, 2, PixelFormat::Gray8, vec![0; 3]).unwrap_err();
        assert_eq!(
            err,
            FrameError::BufferLength {
                expected: 4,
                got: 3
            }
        );
    }

    #[test]
    fn empty_frames_are_rejected_in_pairs() {
        let ok = Frame::from_gray(GrayImage::new(4, 4));
        let err = Frame::check_pair(ViewId::Left, &Frame::empty(), &ok).unwrap_err();
        assert_eq!(err, FrameError::Empty { view: ViewId::Left });

        let small = Frame::from_gray(GrayImage::new(2, 4));
        assert!(matches!(
            Frame::check_pair(ViewId::Top, &ok, &small),
            Err(FrameError::SizeMismatch { .. })
        ));
        assert!(Frame::check_pair(ViewId::Top, &ok, &ok).is_ok());
    }
}

//! Core types for image normalization.

use image::{imageops, GrayImage, RgbImage};
use thiserror::Error;

use crate::locate::Region;

/// Error raised when raw bytes cannot be turned into a working frame.
///
/// These are fatal for the current invocation and are never retried
/// internally; the caller must supply a different image. "No barcode found"
/// is *not* an error - the pipeline reports it as an empty result.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The byte buffer does not match any supported image container.
    #[error("invalid or unsupported image format")]
    InvalidFormat,

    /// The container was recognized but its contents could not be decoded.
    #[error("corrupted or incomplete image data: {0}")]
    CorruptedImage(String),
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (flip horizontal + rotate 270 CW).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Transverse (flip horizontal + rotate 90 CW).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            1 => Orientation::Normal,
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// An orientation-corrected RGB8 frame, the pipeline's canonical working
/// representation of one photo.
#[derive(Debug, Clone)]
pub struct NormalizedFrame {
    image: RgbImage,
}

impl NormalizedFrame {
    /// Wrap an already-upright RGB image.
    pub fn new(image: RgbImage) -> Self {
        Self { image }
    }

    /// Frame width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Frame height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Produce the grayscale derivative used as the unit of decode attempts.
    pub fn to_gray(&self) -> GrayImage {
        imageops::grayscale(&self.image)
    }

    /// Crop a candidate region to grayscale.
    ///
    /// Returns `None` for a degenerate region (zero width or height, or a
    /// region lying entirely outside the frame) so a bad candidate skips
    /// quietly instead of aborting the sweep.
    pub fn crop_gray(&self, region: &Region) -> Option<GrayImage> {
        let left = region.left.min(self.width());
        let top = region.top.min(self.height());
        let width = region.right.min(self.width()).saturating_sub(left);
        let height = region.bottom.min(self.height()).saturating_sub(top);
        if width == 0 || height == 0 {
            return None;
        }

        let crop = imageops::crop_imm(&self.image, left, top, width, height).to_image();
        Some(imageops::grayscale(&crop))
    }
}

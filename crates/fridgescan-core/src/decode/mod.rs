//! Image normalization for the scan pipeline.
//!
//! This module turns raw uploaded bytes into a canonical working frame:
//! - container decode (JPEG, PNG, WebP, ... - the format is guessed from the
//!   byte signature, matching how camera uploads arrive without trustworthy
//!   MIME types)
//! - EXIF orientation correction, so the raster matches the intended upright
//!   viewing orientation
//! - conversion to an RGB8 working color space
//!
//! The resulting [`NormalizedFrame`] is immutable and lives only for the
//! duration of one pipeline invocation. Grayscale derivatives for decode
//! attempts are produced on demand via [`NormalizedFrame::to_gray`] and
//! [`NormalizedFrame::crop_gray`].

mod normalize;
mod types;

pub use normalize::decode_image;
pub use types::{DecodeError, NormalizedFrame, Orientation};

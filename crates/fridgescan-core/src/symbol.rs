//! Decoded symbol results and the symbol-reader seam.
//!
//! The transform/search logic of this crate is decoupled from the concrete
//! decoding library through the narrow [`SymbolReader`] trait: "given a single
//! still raster image, return zero or more decoded symbols with format, text,
//! and rectangle". The production implementation lives in [`crate::reader`];
//! tests substitute fakes to observe the sweep behavior.

use image::GrayImage;
use serde::{Deserialize, Serialize};

/// Symbology of a decoded barcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolFormat {
    Ean13,
    Ean8,
    UpcA,
    UpcE,
    Code39,
    Code93,
    Code128,
    Itf,
    Codabar,
    QrCode,
    DataMatrix,
    Pdf417,
    Aztec,
    /// A symbology outside the set the pipeline distinguishes.
    Unknown,
}

impl std::fmt::Display for SymbolFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SymbolFormat::Ean13 => "EAN-13",
            SymbolFormat::Ean8 => "EAN-8",
            SymbolFormat::UpcA => "UPC-A",
            SymbolFormat::UpcE => "UPC-E",
            SymbolFormat::Code39 => "CODE-39",
            SymbolFormat::Code93 => "CODE-93",
            SymbolFormat::Code128 => "CODE-128",
            SymbolFormat::Itf => "ITF",
            SymbolFormat::Codabar => "CODABAR",
            SymbolFormat::QrCode => "QR",
            SymbolFormat::DataMatrix => "DATA-MATRIX",
            SymbolFormat::Pdf417 => "PDF417",
            SymbolFormat::Aztec => "AZTEC",
            SymbolFormat::Unknown => "UNKNOWN",
        };
        f.write_str(name)
    }
}

/// Axis-aligned rectangle in the coordinate space of the image that was
/// actually decoded (which may be a rotated, scaled, or cropped variant of
/// the original frame).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    /// Axis-aligned hull of a set of points, clamped to the image bounds.
    ///
    /// Returns `None` for an empty point set.
    pub fn from_points<I>(points: I, image_width: u32, image_height: u32) -> Option<Self>
    where
        I: IntoIterator<Item = (f32, f32)>,
    {
        let mut min_x = f32::INFINITY;
        let mut min_y = f32::INFINITY;
        let mut max_x = f32::NEG_INFINITY;
        let mut max_y = f32::NEG_INFINITY;
        let mut seen = false;

        for (x, y) in points {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
            seen = true;
        }

        if !seen {
            return None;
        }

        let x0 = min_x.floor().max(0.0) as u32;
        let y0 = min_y.floor().max(0.0) as u32;
        let x1 = (max_x.ceil().max(0.0) as u32).min(image_width);
        let y1 = (max_y.ceil().max(0.0) as u32).min(image_height);

        Some(Self {
            x: x0.min(image_width),
            y: y0.min(image_height),
            width: x1.saturating_sub(x0).max(1),
            height: y1.saturating_sub(y0).max(1),
        })
    }
}

/// One successfully decoded barcode payload.
///
/// The payload text is never empty; attempts that decode to blank text are
/// dropped before they reach the pipeline's result sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedSymbol {
    /// The symbology that matched.
    pub format: SymbolFormat,
    /// Decoded payload text.
    pub text: String,
    /// Where in the decoded image the symbol was found.
    pub bounds: BoundingBox,
}

/// The underlying multi-symbology reader, treated as a black box.
///
/// Implementations must return an empty vector rather than an error for
/// "nothing readable here", and must already exclude symbols whose payload
/// decodes to an empty string.
pub trait SymbolReader {
    fn read_symbols(&mut self, image: &GrayImage) -> Vec<DecodedSymbol>;
}

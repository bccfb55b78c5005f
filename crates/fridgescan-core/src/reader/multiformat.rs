//! Multi-symbology reading backed by `rxing`.

use image::GrayImage;
use rxing::common::HybridBinarizer;
use rxing::multi::{GenericMultipleBarcodeReader, MultipleBarcodeReader};
use rxing::{
    BarcodeFormat, BinaryBitmap, DecodeHintValue, DecodeHints, Luma8LuminanceSource,
    MultiFormatReader,
};
use tracing::trace;

use crate::symbol::{BoundingBox, DecodedSymbol, SymbolFormat, SymbolReader};

/// [`SymbolReader`] over rxing's multi-format reader.
///
/// Reads every symbology rxing supports in one pass. Reader failures
/// (typically "not found") are reported as an empty result, never as an
/// error; blank payloads are dropped here so downstream code only ever sees
/// non-empty text.
pub struct RxingReader {
    reader: GenericMultipleBarcodeReader<MultiFormatReader>,
    hints: DecodeHints,
}

impl Default for RxingReader {
    fn default() -> Self {
        Self {
            reader: GenericMultipleBarcodeReader::new(MultiFormatReader::default()),
            hints: DecodeHints::default().with(DecodeHintValue::TryHarder(true)),
        }
    }
}

impl RxingReader {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SymbolReader for RxingReader {
    fn read_symbols(&mut self, image: &GrayImage) -> Vec<DecodedSymbol> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Vec::new();
        }

        let source = Luma8LuminanceSource::new(image.as_raw().clone(), width, height);
        let mut bitmap = BinaryBitmap::new(HybridBinarizer::new(source));

        let results = match self.reader.decode_multiple_with_hints(&mut bitmap, &self.hints) {
            Ok(results) => results,
            Err(err) => {
                trace!(error = ?err, "reader found no symbols");
                return Vec::new();
            }
        };

        results
            .into_iter()
            .filter_map(|result| {
                let text = result.getText().trim().to_string();
                if text.is_empty() {
                    return None;
                }

                // Symbols without localization points still carry a payload;
                // fall back to the whole image as their extent.
                let bounds = BoundingBox::from_points(
                    result.getPoints().iter().map(|p| (p.x, p.y)),
                    width,
                    height,
                )
                .unwrap_or(BoundingBox {
                    x: 0,
                    y: 0,
                    width,
                    height,
                });

                Some(DecodedSymbol {
                    format: convert_format(result.getBarcodeFormat()),
                    text,
                    bounds,
                })
            })
            .collect()
    }
}

fn convert_format(format: &BarcodeFormat) -> SymbolFormat {
    match format {
        BarcodeFormat::EAN_13 => SymbolFormat::Ean13,
        BarcodeFormat::EAN_8 => SymbolFormat::Ean8,
        BarcodeFormat::UPC_A => SymbolFormat::UpcA,
        BarcodeFormat::UPC_E => SymbolFormat::UpcE,
        BarcodeFormat::CODE_39 => SymbolFormat::Code39,
        BarcodeFormat::CODE_93 => SymbolFormat::Code93,
        BarcodeFormat::CODE_128 => SymbolFormat::Code128,
        BarcodeFormat::ITF => SymbolFormat::Itf,
        BarcodeFormat::CODABAR => SymbolFormat::Codabar,
        BarcodeFormat::QR_CODE => SymbolFormat::QrCode,
        BarcodeFormat::DATA_MATRIX => SymbolFormat::DataMatrix,
        BarcodeFormat::PDF_417 => SymbolFormat::Pdf417,
        BarcodeFormat::AZTEC => SymbolFormat::Aztec,
        _ => SymbolFormat::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_conversion() {
        assert_eq!(convert_format(&BarcodeFormat::EAN_13), SymbolFormat::Ean13);
        assert_eq!(convert_format(&BarcodeFormat::QR_CODE), SymbolFormat::QrCode);
        assert_eq!(
            convert_format(&BarcodeFormat::MAXICODE),
            SymbolFormat::Unknown
        );
    }

    #[test]
    fn test_empty_image_reads_nothing() {
        let mut reader = RxingReader::new();
        let blank = GrayImage::from_pixel(64, 64, image::Luma([255]));
        assert!(reader.read_symbols(&blank).is_empty());
    }

    #[test]
    fn test_zero_sized_image_reads_nothing() {
        let mut reader = RxingReader::new();
        let empty = GrayImage::new(0, 0);
        assert!(reader.read_symbols(&empty).is_empty());
    }
}

//! Pipeline orchestration: full-frame fast path, then ROI fallback.

use tracing::debug;

use crate::decode::{decode_image, DecodeError};
use crate::locate::find_candidate_regions;
use crate::reader::RxingReader;
use crate::symbol::{DecodedSymbol, SymbolReader};
use crate::variants::decode_with_variants;
use crate::ScanConfig;

/// The barcode scan pipeline.
///
/// Holds the tuning configuration and the underlying symbol reader; both are
/// fixed at construction. Each [`decode_barcodes`](Self::decode_barcodes)
/// call is independent - the scanner keeps no state between images.
///
/// ```ignore
/// let mut scanner = BarcodeScanner::new();
/// let symbols = scanner.decode_barcodes(&upload_bytes)?;
/// if symbols.is_empty() {
///     // no barcode found - ask for a better photo
/// }
/// ```
pub struct BarcodeScanner<R = RxingReader> {
    config: ScanConfig,
    reader: R,
}

impl BarcodeScanner<RxingReader> {
    /// Scanner with default tuning and the rxing-backed reader.
    pub fn new() -> Self {
        Self::with_config(ScanConfig::default())
    }

    /// Scanner with custom tuning and the rxing-backed reader.
    pub fn with_config(config: ScanConfig) -> Self {
        Self {
            config,
            reader: RxingReader::new(),
        }
    }
}

impl Default for BarcodeScanner<RxingReader> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: SymbolReader> BarcodeScanner<R> {
    /// Scanner with an injected symbol reader.
    pub fn with_reader(config: ScanConfig, reader: R) -> Self {
        Self { config, reader }
    }

    /// Extract barcode payloads from raw image bytes.
    ///
    /// The frame is normalized, then decoded directly across the variant
    /// sweep - many photos have the barcode filling most of the frame, where
    /// localization is unnecessary overhead. Only when the full frame yields
    /// nothing does the locator propose candidate regions, each re-swept in
    /// rank order. The first non-empty result wins and nothing further is
    /// attempted.
    ///
    /// An image in which no symbol can be read anywhere yields `Ok` with an
    /// empty vector; that is a normal outcome, not an error.
    ///
    /// # Errors
    ///
    /// [`DecodeError`] if the bytes cannot be parsed as a supported image
    /// container.
    pub fn decode_barcodes(&mut self, bytes: &[u8]) -> Result<Vec<DecodedSymbol>, DecodeError> {
        let frame = decode_image(bytes)?;
        debug!(
            width = frame.width(),
            height = frame.height(),
            "frame normalized"
        );

        let full = frame.to_gray();
        let symbols = decode_with_variants(&full, &mut self.reader, &self.config);
        if !symbols.is_empty() {
            debug!(count = symbols.len(), "full-frame decode succeeded");
            return Ok(symbols);
        }

        let regions = find_candidate_regions(&frame, &self.config);
        for (rank, region) in regions.iter().enumerate() {
            let Some(crop) = frame.crop_gray(region) else {
                continue;
            };
            let symbols = decode_with_variants(&crop, &mut self.reader, &self.config);
            if !symbols.is_empty() {
                debug!(rank, count = symbols.len(), "region decode succeeded");
                return Ok(symbols);
            }
        }

        debug!("no symbol found in frame or any candidate region");
        Ok(Vec::new())
    }
}

//! Fridgescan Core - Barcode localization and decoding pipeline
//!
//! Given an arbitrary photo (rotated, blurry, unevenly lit, barcode occupying
//! an unknown sub-region of the frame), this crate extracts the payloads of
//! any linear or 2D barcodes it can find:
//!
//! 1. The raw bytes are decoded and orientation-corrected ([`decode`]).
//! 2. A direct decode of the whole frame is attempted across a bounded sweep
//!    of rotation, scale, and contrast variants ([`variants`]).
//! 3. If that fails, gradient-texture analysis proposes candidate regions
//!    likely to contain a barcode ([`locate`]), and the same variant sweep is
//!    re-run on each candidate crop in rank order.
//!
//! The first non-empty read wins; an image with no readable symbol yields an
//! empty result, not an error. See [`pipeline::BarcodeScanner`] for the entry
//! point.
//!
//! # Resource model
//!
//! A single invocation is synchronous, CPU-bound, and can perform several
//! hundred transform-and-decode attempts in the worst case. Callers on a
//! latency-sensitive path should run it on a worker thread and enforce any
//! deadline externally, treating a timeout as "no symbol found". The pipeline
//! holds no state across invocations and mutates nothing shared.

pub mod decode;
pub mod locate;
pub mod pipeline;
pub mod reader;
pub mod symbol;
pub mod variants;

pub use decode::{decode_image, DecodeError, NormalizedFrame, Orientation};
pub use locate::{find_candidate_regions, Region};
pub use pipeline::BarcodeScanner;
pub use reader::RxingReader;
pub use symbol::{BoundingBox, DecodedSymbol, SymbolFormat, SymbolReader};
pub use variants::{decode_with_variants, ContrastMode, Rotation, VariantSpec};

/// Tuning parameters for the scan pipeline.
///
/// All constants that shape the variant sweep and the region locator live
/// here so they can be adjusted (or shrunk in tests) without touching control
/// flow. The defaults reproduce the behavior the pipeline was calibrated
/// with; most callers should start from [`ScanConfig::default`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScanConfig {
    /// Rotations tried by the variant engine, in order.
    pub rotations: Vec<Rotation>,
    /// Scale factors tried per rotation, in order. Scales above 1.0 use cubic
    /// upscaling to recover barcodes below the reader's resolution floor.
    pub scales: Vec<f32>,
    /// Contrast treatments tried per (rotation, scale) pair, in order.
    pub contrast_modes: Vec<ContrastMode>,
    /// Tile grid dimension for the CLAHE contrast variant (grid x grid tiles).
    pub clahe_tile_grid: u32,
    /// Histogram clip limit for the CLAHE contrast variant.
    pub clahe_clip_limit: f32,
    /// Neighborhood size for the adaptive-threshold contrast variant.
    pub adaptive_block_size: u32,
    /// Constant subtracted from the local mean by the adaptive threshold.
    pub adaptive_offset: f32,
    /// Gaussian blur sigma applied before gradient computation in the locator.
    pub locator_blur_sigma: f32,
    /// Width and height of the rectangular closing kernel that bridges
    /// individual bars into one connected blob.
    pub morph_kernel: (u32, u32),
    /// Erosion passes (and matching dilation passes) applied after closing to
    /// strip small noise blobs.
    pub morph_passes: u32,
    /// Candidate regions narrower than this are discarded.
    pub min_region_width: u32,
    /// Candidate regions shorter than this are discarded.
    pub min_region_height: u32,
    /// Padding added around each candidate region so the symbol's quiet zone
    /// survives the crop.
    pub region_padding: u32,
    /// Maximum number of candidate regions returned by the locator.
    pub max_regions: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            rotations: vec![
                Rotation::None,
                Rotation::Cw90,
                Rotation::Cw180,
                Rotation::Cw270,
            ],
            scales: vec![1.0, 1.5, 2.0, 3.0],
            contrast_modes: vec![
                ContrastMode::Raw,
                ContrastMode::Clahe,
                ContrastMode::AdaptiveThreshold,
            ],
            clahe_tile_grid: 8,
            clahe_clip_limit: 2.0,
            adaptive_block_size: 31,
            adaptive_offset: 2.0,
            locator_blur_sigma: 0.8,
            morph_kernel: (25, 7),
            morph_passes: 2,
            min_region_width: 80,
            min_region_height: 30,
            region_padding: 12,
            max_regions: 8,
        }
    }
}

impl ScanConfig {
    /// Upper bound on decode attempts for a single image (full frame plus
    /// every candidate region, every variant).
    pub fn max_variants(&self) -> usize {
        self.rotations.len() * self.scales.len() * self.contrast_modes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_variant_count() {
        let config = ScanConfig::default();
        // 4 rotations x 4 scales x 3 contrast treatments
        assert_eq!(config.max_variants(), 48);
    }

    #[test]
    fn test_default_config_identity_first() {
        let config = ScanConfig::default();
        assert_eq!(config.rotations[0], Rotation::None);
        assert_eq!(config.scales[0], 1.0);
        assert_eq!(config.contrast_modes[0], ContrastMode::Raw);
    }

    #[test]
    fn test_default_region_constraints() {
        let config = ScanConfig::default();
        assert_eq!(config.min_region_width, 80);
        assert_eq!(config.min_region_height, 30);
        assert_eq!(config.region_padding, 12);
        assert_eq!(config.max_regions, 8);
    }
}

//! Ordered variant generation and the short-circuiting decode sweep.

use image::{imageops, GrayImage};
use tracing::{debug, trace};

use super::contrast::{adaptive_threshold_gaussian, clahe, ContrastMode};
use crate::symbol::{DecodedSymbol, SymbolReader};
use crate::ScanConfig;

/// Clockwise quarter-turn applied to a decode variant.
///
/// Linear symbol readers are orientation-sensitive; sweeping all four
/// quarter-turns covers arbitrary camera orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    None,
    Cw90,
    Cw180,
    Cw270,
}

impl Rotation {
    pub fn apply(self, image: &GrayImage) -> GrayImage {
        match self {
            Rotation::None => image.clone(),
            Rotation::Cw90 => imageops::rotate90(image),
            Rotation::Cw180 => imageops::rotate180(image),
            Rotation::Cw270 => imageops::rotate270(image),
        }
    }
}

/// One transform descriptor in the decode sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariantSpec {
    pub rotation: Rotation,
    pub scale: f32,
    pub contrast: ContrastMode,
}

/// The full ordered sweep: rotation outer, scale middle, contrast inner.
pub fn variant_specs(config: &ScanConfig) -> Vec<VariantSpec> {
    let mut specs = Vec::with_capacity(config.max_variants());
    for &rotation in &config.rotations {
        for &scale in &config.scales {
            for &contrast in &config.contrast_modes {
                specs.push(VariantSpec {
                    rotation,
                    scale,
                    contrast,
                });
            }
        }
    }
    specs
}

/// Materialize one variant image, or `None` when the transform degenerates
/// (a zero-sized output contributes nothing and must not abort the sweep).
fn apply_variant(gray: &GrayImage, spec: &VariantSpec, config: &ScanConfig) -> Option<GrayImage> {
    let rotated = spec.rotation.apply(gray);

    let scaled = if (spec.scale - 1.0).abs() < f32::EPSILON {
        rotated
    } else {
        let width = (rotated.width() as f32 * spec.scale).round() as u32;
        let height = (rotated.height() as f32 * spec.scale).round() as u32;
        if width == 0 || height == 0 {
            return None;
        }
        // Cubic interpolation: upscaled bars keep edges sharp enough to read.
        imageops::resize(&rotated, width, height, imageops::FilterType::CatmullRom)
    };

    let treated = match spec.contrast {
        ContrastMode::Raw => scaled,
        ContrastMode::Clahe => clahe(&scaled, config.clahe_tile_grid, config.clahe_clip_limit),
        ContrastMode::AdaptiveThreshold => {
            adaptive_threshold_gaussian(&scaled, config.adaptive_block_size, config.adaptive_offset)
        }
    };

    Some(treated)
}

/// Sweep every variant of `gray` through the reader, returning the first
/// non-empty result set and an empty vector once the sweep is exhausted.
///
/// Payloads that decode to blank text do not count as a hit. The function is
/// pure over the pixel data: the same input yields the same result.
pub fn decode_with_variants<R>(
    gray: &GrayImage,
    reader: &mut R,
    config: &ScanConfig,
) -> Vec<DecodedSymbol>
where
    R: SymbolReader + ?Sized,
{
    if gray.width() == 0 || gray.height() == 0 {
        return Vec::new();
    }

    for spec in variant_specs(config) {
        let Some(candidate) = apply_variant(gray, &spec, config) else {
            continue;
        };

        trace!(
            rotation = ?spec.rotation,
            scale = spec.scale,
            contrast = ?spec.contrast,
            width = candidate.width(),
            height = candidate.height(),
            "decode attempt"
        );

        let symbols: Vec<DecodedSymbol> = reader
            .read_symbols(&candidate)
            .into_iter()
            .filter(|symbol| !symbol.text.is_empty())
            .collect();

        if !symbols.is_empty() {
            debug!(
                rotation = ?spec.rotation,
                scale = spec.scale,
                contrast = ?spec.contrast,
                count = symbols.len(),
                "variant decoded"
            );
            return symbols;
        }
    }

    Vec::new()
}

//! The decode variant engine.
//!
//! Barcode readers are brittle to rotation, scale, and local contrast at the
//! same time. Rather than guessing a single best preprocessing step, the
//! engine sweeps a bounded cross-product of cheap transforms - rotation x
//! scale x contrast treatment, up to 48 candidate images - and hands each to
//! the symbol reader, short-circuiting the moment any candidate reads.
//!
//! The sweep is expressed as a flat ordered sequence of [`VariantSpec`]
//! descriptors consumed by one loop, which keeps the short-circuit behavior
//! trivial to observe in tests with a counting fake reader.

mod contrast;
mod engine;

pub use contrast::{adaptive_threshold_gaussian, clahe, ContrastMode};
pub use engine::{decode_with_variants, variant_specs, Rotation, VariantSpec};

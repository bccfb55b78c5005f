//! Contrast treatments for decode variants.
//!
//! Two complementary treatments sit alongside the untouched pixels:
//!
//! - [`clahe`] recovers detail in unevenly lit photos via tile-local
//!   histogram equalization with a clip limit that bounds noise
//!   amplification;
//! - [`adaptive_threshold_gaussian`] flattens illumination gradients into a
//!   clean binary symbol image by thresholding each pixel against a
//!   Gaussian-weighted local mean.

use image::{GrayImage, Luma};
use imageproc::filter::gaussian_blur_f32;

/// Contrast treatment applied to a decode variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContrastMode {
    /// Pixels unchanged.
    Raw,
    /// Tile-local histogram equalization with clipping.
    Clahe,
    /// Binary threshold against a Gaussian-weighted local mean.
    AdaptiveThreshold,
}

/// Contrast-limited adaptive histogram equalization.
///
/// The image is divided into a `tile_grid` x `tile_grid` grid and each tile
/// is equalized against its own histogram. `clip_limit` caps any histogram
/// bin at `clip_limit` times the uniform bin height, with the excess
/// redistributed evenly, which bounds how much flat regions get amplified.
pub fn clahe(image: &GrayImage, tile_grid: u32, clip_limit: f32) -> GrayImage {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 || tile_grid == 0 {
        return image.clone();
    }

    let tile_w = width.div_ceil(tile_grid);
    let tile_h = height.div_ceil(tile_grid);
    let mut result = image.clone();

    for ty in 0..tile_grid {
        for tx in 0..tile_grid {
            let x_start = tx * tile_w;
            let y_start = ty * tile_h;
            if x_start >= width || y_start >= height {
                continue;
            }
            let x_end = (x_start + tile_w).min(width);
            let y_end = (y_start + tile_h).min(height);

            let mut histogram = [0u32; 256];
            for y in y_start..y_end {
                for x in x_start..x_end {
                    histogram[image.get_pixel(x, y)[0] as usize] += 1;
                }
            }

            let tile_pixels = ((x_end - x_start) * (y_end - y_start)) as u32;
            let clip_value = (((tile_pixels as f32 * clip_limit) / 256.0) as u32).max(1);

            let mut clipped_sum = 0u32;
            for count in histogram.iter_mut() {
                if *count > clip_value {
                    clipped_sum += *count - clip_value;
                    *count = clip_value;
                }
            }
            let redistribute = clipped_sum / 256;
            for count in histogram.iter_mut() {
                *count += redistribute;
            }

            let mut cdf = [0u32; 256];
            let mut running = 0u32;
            for (bin, count) in histogram.iter().enumerate() {
                running += count;
                cdf[bin] = running;
            }
            let total = cdf[255].max(1);

            for y in y_start..y_end {
                for x in x_start..x_end {
                    let value = image.get_pixel(x, y)[0] as usize;
                    let mapped = ((cdf[value] as f32 / total as f32) * 255.0).round() as u8;
                    result.put_pixel(x, y, Luma([mapped]));
                }
            }
        }
    }

    result
}

/// Adaptive binary threshold against a Gaussian-weighted local mean.
///
/// Each pixel compares against the Gaussian blur of its `block_size`
/// neighborhood minus `offset`: above means white, at-or-below means black.
/// The sigma is derived from the block size the way OpenCV derives it for an
/// unspecified Gaussian kernel sigma.
pub fn adaptive_threshold_gaussian(image: &GrayImage, block_size: u32, offset: f32) -> GrayImage {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return image.clone();
    }

    let sigma = (0.3 * ((block_size as f32 - 1.0) * 0.5 - 1.0) + 0.8).max(0.1);
    let local_mean = gaussian_blur_f32(image, sigma);

    let mut result = GrayImage::new(width, height);
    for (x, y, pixel) in image.enumerate_pixels() {
        let mean = local_mean.get_pixel(x, y)[0] as f32;
        let value = if (pixel[0] as f32) > mean - offset {
            255
        } else {
            0
        };
        result.put_pixel(x, y, Luma([value]));
    }

    result
}

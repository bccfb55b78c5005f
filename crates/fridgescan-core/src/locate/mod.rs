//! Region-of-interest location via gradient-texture detection.
//!
//! Barcodes have strong, regular horizontal gradient structure (alternating
//! bars) and comparatively weak vertical gradient. Subtracting the vertical
//! Sobel response from the horizontal one highlights barcode-like texture
//! while suppressing generic edges; a wide morphological closing then bridges
//! the gaps between individual bars into one connected blob per symbol, which
//! contour extraction turns into ranked candidate rectangles.
//!
//! This is a classical, non-learned detector: no model, no training data,
//! fully deterministic.

mod region;

pub use region::Region;

use image::{GrayImage, Luma};
use imageproc::contours::{find_contours, BorderType, Contour};
use imageproc::contrast::{otsu_level, threshold, ThresholdType};
use imageproc::filter::gaussian_blur_f32;
use imageproc::gradients::{horizontal_sobel, vertical_sobel};
use imageproc::morphology::{grayscale_close, grayscale_dilate, grayscale_erode, Mask};
use tracing::debug;

use crate::decode::NormalizedFrame;
use crate::ScanConfig;

/// Scan the frame for rectangular regions whose gradient signature resembles
/// a barcode, highest-confidence first.
///
/// Candidates are ranked purely by source-contour area descending: larger
/// blobs are tried first since they are more likely to be the true barcode
/// region in typical close-up photos. At most `config.max_regions` are
/// returned, and rectangles too small to plausibly contain a decodable
/// symbol are discarded.
pub fn find_candidate_regions(frame: &NormalizedFrame, config: &ScanConfig) -> Vec<Region> {
    let gray = frame.to_gray();
    if gray.width() < 3 || gray.height() < 3 {
        return Vec::new();
    }

    // Suppress pixel noise before differentiating.
    let blurred = gaussian_blur_f32(&gray, config.locator_blur_sigma);

    let gradient = directional_gradient(&blurred);

    // Bridge the bars into one blob, then strip small noise blobs while
    // keeping the main region's shape.
    let (kernel_w, kernel_h) = config.morph_kernel;
    let closing_mask = rectangular_mask(kernel_w.max(1), kernel_h.max(1));
    let mut closed = grayscale_close(&gradient, &closing_mask);

    let square = Mask::square(1);
    for _ in 0..config.morph_passes {
        closed = grayscale_erode(&closed, &square);
    }
    for _ in 0..config.morph_passes {
        closed = grayscale_dilate(&closed, &square);
    }

    let level = otsu_level(&closed);
    let binary = threshold(&closed, level, ThresholdType::Binary);

    let contours = find_contours::<i32>(&binary);

    let mut ranked: Vec<(f64, (u32, u32, u32, u32))> = contours
        .iter()
        .filter(|contour| contour.border_type == BorderType::Outer)
        .filter_map(|contour| {
            let rect = bounding_rect(contour)?;
            Some((contour_area(contour), rect))
        })
        .collect();
    ranked.sort_by(|a, b| b.0.total_cmp(&a.0));
    ranked.truncate(config.max_regions);

    let regions: Vec<Region> = ranked
        .into_iter()
        .filter(|(_, (_, _, width, height))| {
            *width >= config.min_region_width && *height >= config.min_region_height
        })
        .map(|(_, (x, y, width, height))| {
            Region::from_rect_padded(
                x,
                y,
                width,
                height,
                config.region_padding,
                frame.width(),
                frame.height(),
            )
        })
        .collect();

    debug!(count = regions.len(), "barcode-like regions located");
    regions
}

/// Horizontal-minus-vertical Sobel magnitude, rescaled to 8 bits.
fn directional_gradient(gray: &GrayImage) -> GrayImage {
    let grad_x = horizontal_sobel(gray);
    let grad_y = vertical_sobel(gray);

    GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        let gx = grad_x.get_pixel(x, y)[0] as i32;
        let gy = grad_y.get_pixel(x, y)[0] as i32;
        Luma([(gx - gy).abs().min(255) as u8])
    })
}

/// Solid rectangular structuring element centered on its midpoint.
fn rectangular_mask(width: u32, height: u32) -> Mask {
    let shape = GrayImage::from_pixel(width, height, Luma([255]));
    Mask::from_image(&shape, (width / 2) as u8, (height / 2) as u8)
}

/// Axis-aligned bounding rectangle of a contour as (x, y, width, height).
fn bounding_rect(contour: &Contour<i32>) -> Option<(u32, u32, u32, u32)> {
    let mut min_x = i32::MAX;
    let mut min_y = i32::MAX;
    let mut max_x = i32::MIN;
    let mut max_y = i32::MIN;

    for point in &contour.points {
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }

    if min_x > max_x || min_y > max_y {
        return None;
    }

    let x = min_x.max(0) as u32;
    let y = min_y.max(0) as u32;
    let width = (max_x - min_x + 1).max(1) as u32;
    let height = (max_y - min_y + 1).max(1) as u32;
    Some((x, y, width, height))
}

/// Enclosed polygon area of a contour (shoelace formula).
fn contour_area(contour: &Contour<i32>) -> f64 {
    let points = &contour.points;
    if points.len() < 3 {
        return 0.0;
    }

    let mut doubled: i64 = 0;
    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        doubled += a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64;
    }
    (doubled.abs() as f64) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    /// Paint a block of vertical bars (alternating dark/light stripes) onto a
    /// uniform background - the gradient signature of a linear barcode.
    fn frame_with_bars(
        frame_w: u32,
        frame_h: u32,
        x0: u32,
        y0: u32,
        bars_w: u32,
        bars_h: u32,
    ) -> NormalizedFrame {
        let image = RgbImage::from_fn(frame_w, frame_h, |x, y| {
            let inside = x >= x0 && x < x0 + bars_w && y >= y0 && y < y0 + bars_h;
            if inside && ((x - x0) / 3) % 2 == 0 {
                image::Rgb([20, 20, 20])
            } else {
                image::Rgb([220, 220, 220])
            }
        });
        NormalizedFrame::new(image)
    }

    #[test]
    fn test_bars_produce_containing_region() {
        let frame = frame_with_bars(640, 480, 200, 150, 180, 80);
        let regions = find_candidate_regions(&frame, &ScanConfig::default());

        assert!(!regions.is_empty(), "expected at least one candidate");
        let hit = regions.iter().any(|r| {
            r.left <= 210 && r.right >= 370 && r.top <= 160 && r.bottom >= 220
        });
        assert!(hit, "no candidate contains the bar block: {:?}", regions);
    }

    #[test]
    fn test_blank_frame_produces_no_regions() {
        let frame = NormalizedFrame::new(RgbImage::from_pixel(
            400,
            300,
            image::Rgb([180, 180, 180]),
        ));
        let regions = find_candidate_regions(&frame, &ScanConfig::default());
        assert!(regions.is_empty(), "uniform frame should yield nothing");
    }

    #[test]
    fn test_small_bars_filtered_out() {
        // 40x16 bar block: below the 80x30 minimum, must never surface.
        let frame = frame_with_bars(640, 480, 100, 100, 40, 16);
        let regions = find_candidate_regions(&frame, &ScanConfig::default());
        assert!(regions.is_empty(), "undersized block leaked: {:?}", regions);
    }

    #[test]
    fn test_region_count_capped() {
        let config = ScanConfig::default();
        // A grid of bar blocks, more than max_regions of them.
        let mut image = RgbImage::from_pixel(1600, 1200, image::Rgb([220, 220, 220]));
        for row in 0..4 {
            for col in 0..3 {
                let x0 = 60 + col * 500;
                let y0 = 60 + row * 280;
                for x in x0..x0 + 180 {
                    for y in y0..y0 + 80 {
                        if ((x - x0) / 3) % 2 == 0 {
                            image.put_pixel(x, y, image::Rgb([20, 20, 20]));
                        }
                    }
                }
            }
        }
        let frame = NormalizedFrame::new(image);
        let regions = find_candidate_regions(&frame, &config);
        assert!(regions.len() <= config.max_regions);
    }

    #[test]
    fn test_regions_stay_in_frame() {
        // Bar block flush against the frame corner: padding must clamp.
        let frame = frame_with_bars(400, 300, 0, 0, 120, 50);
        let regions = find_candidate_regions(&frame, &ScanConfig::default());
        for region in &regions {
            assert!(region.right <= 400);
            assert!(region.bottom <= 300);
        }
    }

    #[test]
    fn test_locator_deterministic() {
        let frame = frame_with_bars(640, 480, 200, 150, 180, 80);
        let config = ScanConfig::default();
        assert_eq!(
            find_candidate_regions(&frame, &config),
            find_candidate_regions(&frame, &config)
        );
    }

    #[test]
    fn test_tiny_frame_is_safe() {
        let frame = NormalizedFrame::new(RgbImage::from_pixel(2, 2, image::Rgb([128, 128, 128])));
        assert!(find_candidate_regions(&frame, &ScanConfig::default()).is_empty());
    }
}

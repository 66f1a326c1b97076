//! Grayscale brightness statistics.

use image::{GrayImage, Luma, RgbImage};

use crate::models::PixelPoint;

/// Convert an RGB image to grayscale using ITU-R BT.601 luminance
/// (`Y = 0.299 R + 0.587 G + 0.114 B`).
///
/// The transform is fixed here rather than delegated to the image crate,
/// whose default luma conversion uses BT.709 weights — reported brightness
/// values depend on it and the tests pin it against known pixel values.
pub fn rgb_to_luma(rgb: &RgbImage) -> GrayImage {
    let (w, h) = (rgb.width(), rgb.height());
    let mut gray = GrayImage::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let p = rgb.get_pixel(x, y);
            let luma = (0.299 * p.0[0] as f32
                + 0.587 * p.0[1] as f32
                + 0.114 * p.0[2] as f32) as u8;
            gray.put_pixel(x, y, Luma([luma]));
        }
    }
    gray
}

/// Brightness statistics computed in a single row-major scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrightnessStats {
    /// Arithmetic mean of all grayscale samples.
    pub average: f64,
    pub max_value: u8,
    pub max_point: PixelPoint,
    pub min_value: u8,
    pub min_point: PixelPoint,
}

/// Scan the image in row-major order (left to right within each row, rows
/// top to bottom) for the mean and the global extremes.
///
/// When several pixels share an extreme value, the first one encountered
/// wins — the strict comparisons below make that deterministic.
///
/// Returns `None` for an image with no pixels.
pub fn scan_brightness(gray: &GrayImage) -> Option<BrightnessStats> {
    let (w, h) = (gray.width(), gray.height());
    if w == 0 || h == 0 {
        return None;
    }

    let first = gray.get_pixel(0, 0).0[0];
    let mut sum = 0u64;
    let mut max_value = first;
    let mut max_point = PixelPoint { x: 0, y: 0 };
    let mut min_value = first;
    let mut min_point = PixelPoint { x: 0, y: 0 };

    for y in 0..h {
        for x in 0..w {
            let v = gray.get_pixel(x, y).0[0];
            sum += v as u64;
            if v > max_value {
                max_value = v;
                max_point = PixelPoint { x, y };
            }
            if v < min_value {
                min_value = v;
                min_point = PixelPoint { x, y };
            }
        }
    }

    Some(BrightnessStats {
        average: sum as f64 / (w as u64 * h as u64) as f64,
        max_value,
        max_point,
        min_value,
        min_point,
    })
}

//! Marker and label drawing for annotated output images.
//!
//! Markers go onto a copy of the original color image, never the grayscale
//! intermediate, so only the marker pixels themselves overwrite original
//! colors. Labels are rendered from an embedded 5x7 bitmap font — the two
//! fixed captions don't justify bundling a font file.

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_circle_mut;

use crate::models::PixelPoint;

pub const MARKER_RADIUS: i32 = 10;
pub const MARKER_STROKE: i32 = 2;
pub const BRIGHT_COLOR: Rgb<u8> = Rgb([220, 30, 30]);
pub const DARK_COLOR: Rgb<u8> = Rgb([30, 60, 220]);

/// Horizontal gap between a marker center and its label.
const LABEL_OFFSET_X: i32 = 15;
/// Integer upscale of the 5x7 glyphs.
const LABEL_SCALE: i32 = 2;
/// Glyph cell height in font rows.
const GLYPH_ROWS: i32 = 7;
/// Glyph cell width in font columns, plus one column of spacing.
const GLYPH_ADVANCE: i32 = 6;

/// Draw both extreme-point markers with their captions.
pub fn annotate_extremes(img: &mut RgbImage, brightest: PixelPoint, darkest: PixelPoint) {
    draw_marker(img, brightest, BRIGHT_COLOR, "BRIGHTEST");
    draw_marker(img, darkest, DARK_COLOR, "DARKEST");
}

fn draw_marker(img: &mut RgbImage, point: PixelPoint, color: Rgb<u8>, label: &str) {
    let (cx, cy) = (point.x as i32, point.y as i32);

    // Concentric circles approximate a 2px stroke
    for r in (MARKER_RADIUS - MARKER_STROKE + 1)..=MARKER_RADIUS {
        draw_hollow_circle_mut(img, (cx, cy), r, color);
    }

    let label_y = cy - (GLYPH_ROWS * LABEL_SCALE) / 2;
    draw_label(img, cx + LABEL_OFFSET_X, label_y, label, color);
}

/// Render uppercase label text at (x, y). Pixels outside the image are
/// clipped, so labels near an edge degrade instead of panicking.
pub fn draw_label(img: &mut RgbImage, x: i32, y: i32, text: &str, color: Rgb<u8>) {
    let mut pen_x = x;
    for c in text.chars() {
        if let Some(rows) = glyph(c.to_ascii_uppercase()) {
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..5 {
                    if bits & (0x10 >> col) != 0 {
                        fill_block(
                            img,
                            pen_x + col as i32 * LABEL_SCALE,
                            y + row as i32 * LABEL_SCALE,
                            color,
                        );
                    }
                }
            }
        }
        pen_x += GLYPH_ADVANCE * LABEL_SCALE;
    }
}

/// Fill one scaled font pixel, clipped to the image bounds.
fn fill_block(img: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>) {
    for dy in 0..LABEL_SCALE {
        for dx in 0..LABEL_SCALE {
            let (px, py) = (x + dx, y + dy);
            if px >= 0 && py >= 0 && (px as u32) < img.width() && (py as u32) < img.height() {
                img.put_pixel(px as u32, py as u32, color);
            }
        }
    }
}

/// 5x7 glyph rows, 5 bits per row, MSB on the left. Covers exactly the
/// letters the two captions need.
fn glyph(c: char) -> Option<[u8; 7]> {
    match c {
        'A' => Some([0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11]),
        'B' => Some([0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E]),
        'D' => Some([0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E]),
        'E' => Some([0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F]),
        'G' => Some([0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0E]),
        'H' => Some([0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11]),
        'I' => Some([0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E]),
        'K' => Some([0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11]),
        'R' => Some([0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11]),
        'S' => Some([0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E]),
        'T' => Some([0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_colored(img: &RgbImage, color: Rgb<u8>) -> usize {
        img.pixels().filter(|p| **p == color).count()
    }

    #[test]
    fn captions_have_full_glyph_coverage() {
        for c in "BRIGHTEST".chars().chain("DARKEST".chars()) {
            assert!(glyph(c).is_some(), "missing glyph for '{c}'");
        }
    }

    #[test]
    fn marker_draws_circle_stroke() {
        let mut img = RgbImage::from_pixel(64, 64, Rgb([0, 0, 0]));
        draw_marker(&mut img, PixelPoint { x: 32, y: 32 }, BRIGHT_COLOR, "");

        // A point on the circle at the full radius carries the marker color
        let on_circle = img.get_pixel(32 + MARKER_RADIUS as u32, 32);
        assert_eq!(*on_circle, BRIGHT_COLOR);
        // The center is untouched
        assert_eq!(*img.get_pixel(32, 32), Rgb([0, 0, 0]));
    }

    #[test]
    fn label_renders_pixels_in_requested_color() {
        let mut img = RgbImage::from_pixel(120, 30, Rgb([0, 0, 0]));
        draw_label(&mut img, 2, 2, "BRIGHTEST", DARK_COLOR);
        assert!(count_colored(&img, DARK_COLOR) > 50);
    }

    #[test]
    fn label_clips_at_image_edges_without_panic() {
        let mut img = RgbImage::from_pixel(10, 10, Rgb([0, 0, 0]));
        draw_label(&mut img, 5, 5, "DARKEST", BRIGHT_COLOR);
        draw_label(&mut img, -8, -3, "DARKEST", BRIGHT_COLOR);
        // Some of the first label lands inside the image
        assert!(count_colored(&img, BRIGHT_COLOR) > 0);
    }

    #[test]
    fn annotate_near_corner_does_not_panic() {
        let mut img = RgbImage::from_pixel(20, 20, Rgb([128, 128, 128]));
        annotate_extremes(
            &mut img,
            PixelPoint { x: 0, y: 0 },
            PixelPoint { x: 19, y: 19 },
        );
        assert!(count_colored(&img, BRIGHT_COLOR) > 0);
        assert!(count_colored(&img, DARK_COLOR) > 0);
    }

    #[test]
    fn annotation_only_touches_marker_pixels() {
        let base = Rgb([90, 90, 90]);
        let mut img = RgbImage::from_pixel(80, 80, base);
        annotate_extremes(
            &mut img,
            PixelPoint { x: 20, y: 40 },
            PixelPoint { x: 60, y: 40 },
        );
        // A pixel far from both markers and labels keeps its original color
        assert_eq!(*img.get_pixel(5, 5), base);
    }
}

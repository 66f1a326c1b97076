//! Brightness analysis pipeline: decode, scan, annotate, write PNG.

pub mod annotate;
pub mod stats;

use std::io::Cursor;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use image::{DynamicImage, ImageOutputFormat, RgbImage};
use thiserror::Error;
use tracing::debug;

use crate::models::BrightnessReport;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("could not decode image: {0}")]
    Decode(String),

    #[error("could not encode annotated image: {0}")]
    Encode(String),

    #[error("could not write annotated image: {0}")]
    Io(#[from] std::io::Error),
}

/// Per-process sequence appended to output filenames. Disambiguates
/// uploads landing within the same second; names never repeat within a
/// process lifetime.
static OUTPUT_SEQ: AtomicU64 = AtomicU64::new(0);

fn next_output_filename() -> String {
    let seq = OUTPUT_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("output_{}_{:04}.png", chrono::Utc::now().timestamp(), seq)
}

/// Analyze one uploaded image and write the annotated copy to `output_dir`.
///
/// Decode failure (empty buffer, corrupt data, unsupported format) returns
/// [`AnalyzerError::Decode`] before anything touches the filesystem. The
/// annotated PNG is encoded fully in memory and written with a single call,
/// so a failed request never leaves a partial output file behind.
pub fn analyze_brightness(
    bytes: &[u8],
    filename: &str,
    output_dir: &Path,
) -> Result<BrightnessReport, AnalyzerError> {
    let decoded =
        image::load_from_memory(bytes).map_err(|e| AnalyzerError::Decode(e.to_string()))?;

    let mut rgb = decoded.to_rgb8();
    let (width, height) = (rgb.width(), rgb.height());

    let gray = stats::rgb_to_luma(&rgb);
    let s = stats::scan_brightness(&gray)
        .ok_or_else(|| AnalyzerError::Decode("image has no pixels".into()))?;

    // Markers go on the color copy; the grayscale image is never written out
    annotate::annotate_extremes(&mut rgb, s.max_point, s.min_point);
    let png = encode_png(&rgb)?;

    let output_filename = next_output_filename();
    let output_path = output_dir.join(&output_filename);
    std::fs::write(&output_path, &png)?;

    debug!(
        filename,
        output = %output_path.display(),
        average = s.average,
        brightest = s.max_value,
        darkest = s.min_value,
        "image analyzed"
    );

    Ok(BrightnessReport {
        filename: filename.to_string(),
        average_brightness: s.average,
        brightest_value: s.max_value as f64,
        brightest_point: s.max_point,
        darkest_value: s.min_value as f64,
        darkest_point: s.min_point,
        processed_image_path: output_path.display().to_string(),
        output_filename,
        width,
        height,
    })
}

fn encode_png(img: &RgbImage) -> Result<Vec<u8>, AnalyzerError> {
    let dynamic = DynamicImage::ImageRgb8(img.clone());
    let mut cursor = Cursor::new(Vec::new());
    dynamic
        .write_to(&mut cursor, ImageOutputFormat::Png)
        .map_err(|e| AnalyzerError::Encode(e.to_string()))?;
    Ok(cursor.into_inner())
}

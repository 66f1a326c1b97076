//! Shared value types for analysis results.

use serde::{Deserialize, Serialize};

/// A pixel coordinate, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: u32,
    pub y: u32,
}

/// The result of analyzing one uploaded image.
///
/// Computed once by the analyzer and immutable afterwards. The store
/// assigns `id` and `created_at` at insertion time (see [`AnalysisRecord`]).
///
/// Intensity values come from the ITU-R BT.601 grayscale transform, so
/// `average_brightness`, `brightest_value` and `darkest_value` all live
/// in `[0, 255]`.
#[derive(Debug, Clone, Serialize)]
pub struct BrightnessReport {
    /// Original uploaded file name.
    pub filename: String,
    /// Arithmetic mean of all grayscale samples.
    pub average_brightness: f64,
    pub brightest_value: f64,
    pub brightest_point: PixelPoint,
    pub darkest_value: f64,
    pub darkest_point: PixelPoint,
    /// Generated name of the annotated PNG inside the output directory.
    pub output_filename: String,
    /// Path of the annotated PNG as written (output dir + filename).
    pub processed_image_path: String,
    pub width: u32,
    pub height: u32,
}

/// A persisted analysis row, as returned by `ResultStore::list_recent`.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisRecord {
    pub id: i64,
    pub filename: String,
    pub average_brightness: f64,
    pub brightest_value: f64,
    pub brightest_point: PixelPoint,
    pub darkest_value: f64,
    pub darkest_point: PixelPoint,
    pub processed_image_path: String,
    pub created_at: String,
}

//! `POST /analyze` — multipart image upload, analysis, best-effort persist.

use std::time::Duration;

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use tracing::warn;

use crate::analyzer::analyze_brightness;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::PixelPoint;

/// Accepted upload extensions (case-insensitive).
const ALLOWED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Bound on the decode/annotate step so one pathological upload cannot
/// pin a blocking worker indefinitely.
const ANALYZE_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize)]
pub struct AnalyzeResponse {
    /// Row id assigned by the store; `null` when persistence failed —
    /// the analysis itself still succeeded.
    pub id: Option<i64>,
    pub filename: String,
    pub average_brightness: f64,
    pub brightest_value: f64,
    pub brightest_point: PixelPoint,
    pub darkest_value: f64,
    pub darkest_point: PixelPoint,
    pub processed_image_path: String,
    pub processed_img_url: String,
}

pub async fn analyze(
    State(ctx): State<ApiContext>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let upload = read_upload(&mut multipart).await?;
    validate_upload(&upload)?;

    // Pixel work is CPU-bound; run it off the async workers, bounded.
    let output_dir = ctx.config.output_dir.clone();
    let filename = upload.filename.clone();
    let bytes = upload.bytes;
    let task = tokio::task::spawn_blocking(move || {
        analyze_brightness(&bytes, &filename, &output_dir)
    });
    let report = tokio::time::timeout(ANALYZE_TIMEOUT, task)
        .await
        .map_err(|_| ApiError::Internal("image analysis timed out".into()))?
        .map_err(|e| ApiError::Internal(format!("analysis task failed: {e}")))?
        .map_err(ApiError::from)?;

    // Best-effort persistence: failure is logged, never surfaced
    let id = match ctx.store.insert(&report) {
        Ok(id) => Some(id),
        Err(e) => {
            warn!(error = %e, filename = %report.filename, "failed to persist analysis result");
            None
        }
    };

    let processed_img_url = format!(
        "{}/files/{}",
        ctx.config.public_base_url.trim_end_matches('/'),
        report.output_filename
    );

    Ok(Json(AnalyzeResponse {
        id,
        filename: report.filename,
        average_brightness: report.average_brightness,
        brightest_value: report.brightest_value,
        brightest_point: report.brightest_point,
        darkest_value: report.darkest_value,
        darkest_point: report.darkest_point,
        processed_image_path: report.processed_image_path,
        processed_img_url,
    }))
}

struct Upload {
    filename: String,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

async fn read_upload(multipart: &mut Multipart) -> Result<Upload, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidUpload(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().map(|ct| ct.to_string());
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::InvalidUpload(e.to_string()))?
            .to_vec();
        return Ok(Upload {
            filename,
            content_type,
            bytes,
        });
    }
    Err(ApiError::InvalidUpload(
        "missing multipart field 'file'".into(),
    ))
}

/// Rejects bad uploads before any decoding starts.
fn validate_upload(upload: &Upload) -> Result<(), ApiError> {
    match upload.content_type.as_deref() {
        Some(ct) if ct.starts_with("image/") => {}
        Some(ct) => {
            return Err(ApiError::InvalidUpload(format!(
                "file must be an image, got content type '{ct}'"
            )))
        }
        None => {
            return Err(ApiError::InvalidUpload(
                "file must declare an image content type".into(),
            ))
        }
    }

    let ext = std::path::Path::new(&upload.filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext {
        Some(ref e) if ALLOWED_EXTENSIONS.contains(&e.as_str()) => Ok(()),
        _ => Err(ApiError::InvalidUpload(
            "file must be a .jpg, .jpeg or .png".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(filename: &str, content_type: Option<&str>) -> Upload {
        Upload {
            filename: filename.into(),
            content_type: content_type.map(String::from),
            bytes: Vec::new(),
        }
    }

    #[test]
    fn image_extensions_accepted_case_insensitively() {
        for name in ["a.png", "b.jpg", "c.jpeg", "d.PNG", "e.JpG"] {
            assert!(validate_upload(&upload(name, Some("image/png"))).is_ok(), "{name}");
        }
    }

    #[test]
    fn non_image_content_type_rejected() {
        let err = validate_upload(&upload("a.png", Some("text/plain"))).unwrap_err();
        assert!(matches!(err, ApiError::InvalidUpload(_)));
    }

    #[test]
    fn missing_content_type_rejected() {
        assert!(validate_upload(&upload("a.png", None)).is_err());
    }

    #[test]
    fn disallowed_extension_rejected() {
        for name in ["a.gif", "b.bmp", "noext", "tricky.png.exe"] {
            assert!(validate_upload(&upload(name, Some("image/png"))).is_err(), "{name}");
        }
    }
}

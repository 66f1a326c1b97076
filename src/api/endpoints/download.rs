//! `GET /download/:filename` — stream a previously produced annotated image.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;

pub async fn download(
    State(ctx): State<ApiContext>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    if !is_safe_filename(&filename) {
        return Err(ApiError::InvalidUpload("invalid filename".into()));
    }

    let path = ctx.config.output_dir.join(&filename);
    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ApiError::NotFound(format!(
                "no processed image named '{filename}'"
            )));
        }
        Err(e) => return Err(ApiError::Internal(format!("reading {filename}: {e}"))),
    };

    let mime = mime_guess::from_path(&filename).first_or_octet_stream();
    Ok((
        [
            (header::CONTENT_TYPE, mime.as_ref().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// Served files live flat in the output directory; anything that could
/// escape it is rejected.
fn is_safe_filename(name: &str) -> bool {
    !name.is_empty() && !name.contains(['/', '\\']) && !name.contains("..")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_names_accepted() {
        assert!(is_safe_filename("output_1700000000_0001.png"));
    }

    #[test]
    fn traversal_names_rejected() {
        assert!(!is_safe_filename("../etc/passwd"));
        assert!(!is_safe_filename("a/../../b.png"));
        assert!(!is_safe_filename("sub/dir.png"));
        assert!(!is_safe_filename("back\\slash.png"));
        assert!(!is_safe_filename(""));
    }
}

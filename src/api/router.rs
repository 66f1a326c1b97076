//! Service router: analysis, history, downloads and the static file prefix.
//!
//! Annotated images are additionally served read-only under `/files/` via
//! `ServeDir`; the history listing keeps the `/result` path to itself.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Maximum accepted request body (uploads included).
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Build the full service router.
pub fn service_router(ctx: ApiContext) -> Router {
    let files = ServeDir::new(&ctx.config.output_dir);

    Router::new()
        .route("/", get(endpoints::health::probe))
        .route("/analyze", post(endpoints::analyze::analyze))
        .route("/download/:filename", get(endpoints::download::download))
        .route("/result", get(endpoints::results::recent))
        .nest_service("/files", files)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(ctx)
}

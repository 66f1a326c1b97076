//! `GET /` — liveness/version probe.

use axum::Json;
use serde::Serialize;

use crate::config::{APP_NAME, APP_VERSION};

#[derive(Serialize)]
pub struct HealthResponse {
    pub message: &'static str,
    pub version: &'static str,
}

pub async fn probe() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: APP_NAME,
        version: APP_VERSION,
    })
}

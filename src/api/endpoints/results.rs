//! `GET /result` — recent analysis history, newest first.

use axum::extract::State;
use axum::Json;
use tracing::warn;

use crate::api::types::ApiContext;
use crate::db::store::DEFAULT_HISTORY_LIMIT;
use crate::models::AnalysisRecord;

/// History is best-effort: a store failure is logged and degrades to an
/// empty list instead of failing the request.
pub async fn recent(State(ctx): State<ApiContext>) -> Json<Vec<AnalysisRecord>> {
    let records = ctx
        .store
        .list_recent(DEFAULT_HISTORY_LIMIT)
        .unwrap_or_else(|e| {
            warn!(error = %e, "failed to read analysis history");
            Vec::new()
        });
    Json(records)
}

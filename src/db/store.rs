//! Result store — one row per analyzed image.

use std::path::PathBuf;

use rusqlite::params;
use tracing::debug;

use super::sqlite::{create_schema, open_database};
use super::StoreError;
use crate::models::{AnalysisRecord, BrightnessReport, PixelPoint};

/// How many rows the history endpoint returns by default.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Persists brightness analysis results.
///
/// Holds only the database path: every operation opens its own connection
/// and releases it (and any prepared statement) when it drops, on every
/// exit path. Concurrent requests therefore never share a handle and rely
/// on SQLite's own locking for simultaneous inserts.
///
/// All operations return `Result` so callers can observe the degraded path
/// explicitly — on the analyze flow an insert failure is logged and the
/// request still succeeds.
#[derive(Debug, Clone)]
pub struct ResultStore {
    db_path: PathBuf,
}

impl ResultStore {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// Idempotently create the database file and the results table.
    ///
    /// Called once during process initialization; safe to call on every
    /// start. Fails only on genuine open or permission failure.
    pub fn ensure_schema(&self) -> Result<(), StoreError> {
        let conn = open_database(&self.db_path)?;
        create_schema(&conn)
    }

    /// Persist one analysis result. Returns the assigned row id.
    ///
    /// The statement is parameterized — field values never reach the SQL
    /// text. `created_at` is filled in by the table default.
    pub fn insert(&self, report: &BrightnessReport) -> Result<i64, StoreError> {
        let conn = open_database(&self.db_path)?;
        conn.execute(
            "INSERT INTO analysis_results (filename, average_brightness, brightest_value,
             brightest_x, brightest_y, darkest_value, darkest_x, darkest_y, processed_image_path)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                report.filename,
                report.average_brightness,
                report.brightest_value,
                report.brightest_point.x as i64,
                report.brightest_point.y as i64,
                report.darkest_value,
                report.darkest_point.x as i64,
                report.darkest_point.y as i64,
                report.processed_image_path,
            ],
        )?;
        let id = conn.last_insert_rowid();
        debug!(id, filename = %report.filename, "analysis result stored");
        Ok(id)
    }

    /// Up to `limit` most recently created rows, newest first.
    ///
    /// `created_at` has second resolution, so ties are broken by `id` to
    /// keep the ordering deterministic.
    pub fn list_recent(&self, limit: usize) -> Result<Vec<AnalysisRecord>, StoreError> {
        let conn = open_database(&self.db_path)?;
        let mut stmt = conn.prepare(
            "SELECT id, filename, average_brightness, brightest_value, brightest_x, brightest_y,
             darkest_value, darkest_x, darkest_y, processed_image_path, created_at
             FROM analysis_results
             ORDER BY created_at DESC, id DESC
             LIMIT ?1",
        )?;

        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok(AnalysisRecord {
                id: row.get(0)?,
                filename: row.get(1)?,
                average_brightness: row.get(2)?,
                brightest_value: row.get(3)?,
                brightest_point: PixelPoint {
                    x: row.get(4)?,
                    y: row.get(5)?,
                },
                darkest_value: row.get(6)?,
                darkest_point: PixelPoint {
                    x: row.get(7)?,
                    y: row.get(8)?,
                },
                processed_image_path: row.get(9)?,
                created_at: row.get(10)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

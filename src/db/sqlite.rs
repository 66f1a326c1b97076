//! Connection plumbing for the result store.
//!
//! One table, no migration chain: the schema is applied with
//! `CREATE ... IF NOT EXISTS` semantics so it is safe to run on every
//! process start.

use std::path::Path;

use rusqlite::Connection;

use super::StoreError;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS analysis_results (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    filename TEXT NOT NULL,
    average_brightness REAL NOT NULL,
    brightest_value REAL NOT NULL,
    brightest_x INTEGER NOT NULL,
    brightest_y INTEGER NOT NULL,
    darkest_value REAL NOT NULL,
    darkest_x INTEGER NOT NULL,
    darkest_y INTEGER NOT NULL,
    processed_image_path TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);
CREATE INDEX IF NOT EXISTS idx_analysis_results_created_at
    ON analysis_results (created_at DESC);
";

/// Open a SQLite connection to the given path.
pub fn open_database(path: &Path) -> Result<Connection, StoreError> {
    let conn = Connection::open(path)?;
    configure_pragmas(&conn)?;
    Ok(conn)
}

/// Open an in-memory database (for testing).
pub fn open_memory_database() -> Result<Connection, StoreError> {
    let conn = Connection::open_in_memory()?;
    configure_pragmas(&conn)?;
    Ok(conn)
}

fn configure_pragmas(conn: &Connection) -> Result<(), StoreError> {
    // WAL lets concurrent requests (each on its own connection) read while
    // one inserts.
    conn.execute_batch(
        "PRAGMA journal_mode=WAL;
         PRAGMA foreign_keys=ON;",
    )?;
    Ok(())
}

/// Idempotently create the `analysis_results` table and its index.
pub fn create_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(SCHEMA)
        .map_err(|e| StoreError::Schema(e.to_string()))
}

/// Count tables in the database (for verification).
pub fn count_tables(conn: &Connection) -> Result<i64, StoreError> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |row| row.get::<_, i64>(0),
    )?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_creates_results_table() {
        let conn = open_memory_database().unwrap();
        create_schema(&conn).unwrap();
        let count = count_tables(&conn).unwrap();
        // analysis_results + sqlite_sequence (from AUTOINCREMENT)
        assert!(count >= 1, "expected at least 1 table, got {count}");

        let exists: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='analysis_results'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(exists, 1);
    }

    #[test]
    fn schema_creation_idempotent() {
        let conn = open_memory_database().unwrap();
        create_schema(&conn).unwrap();
        // Run again — must not error
        create_schema(&conn).unwrap();
    }

    #[test]
    fn created_at_defaults_to_now() {
        let conn = open_memory_database().unwrap();
        create_schema(&conn).unwrap();
        conn.execute(
            "INSERT INTO analysis_results (filename, average_brightness, brightest_value,
             brightest_x, brightest_y, darkest_value, darkest_x, darkest_y, processed_image_path)
             VALUES ('a.png', 10.0, 20.0, 1, 2, 5.0, 3, 4, 'result/out.png')",
            [],
        )
        .unwrap();

        let created_at: String = conn
            .query_row("SELECT created_at FROM analysis_results", [], |row| row.get(0))
            .unwrap();
        assert!(!created_at.is_empty());
    }

    #[test]
    fn foreign_keys_enabled() {
        let conn = open_memory_database().unwrap();
        let fk: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk, 1);
    }
}

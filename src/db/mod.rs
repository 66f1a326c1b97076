pub mod sqlite;
pub mod store;

pub use store::ResultStore;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("schema creation failed: {0}")]
    Schema(String),
}

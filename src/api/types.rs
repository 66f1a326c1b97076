//! Shared handler state.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::ResultStore;

/// State handed to every handler: the resolved configuration plus the
/// result store built from it.
#[derive(Clone)]
pub struct ApiContext {
    pub config: Arc<AppConfig>,
    pub store: ResultStore,
}

impl ApiContext {
    pub fn new(config: AppConfig) -> Self {
        let store = ResultStore::new(config.db_path.clone());
        Self {
            config: Arc::new(config),
            store,
        }
    }
}

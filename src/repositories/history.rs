//! Recent search queries persisted under the `history` key.

use std::sync::Arc;

use crate::config::Config;
use crate::context::{AppStorage, Context};
use crate::di::FromContext;
use crate::error::AppError;

const HISTORY_KEY: &str = "history";

/// Most-recent-first list of normalized queries, without duplicates.
#[derive(FromContext, Clone)]
pub struct HistoryRepository {
    storage: AppStorage,
    config: Arc<Config>,
}

impl HistoryRepository {
    pub fn list(&self) -> Vec<String> {
        self.storage.read(HISTORY_KEY)
    }

    /// Record a query at the front, moving it there if already present.
    pub fn add(&self, query: &str) -> Result<(), AppError> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Ok(());
        }

        let mut history = self.list();
        history.retain(|q| *q != query);
        history.insert(0, query);
        history.truncate(self.config.storage.max_history);
        self.storage.write(HISTORY_KEY, &history)
    }

    pub fn clear(&self) -> Result<(), AppError> {
        self.storage.remove(HISTORY_KEY)
    }
}

//! Retention sweep for chat messages
//!
//! A recurring task with its own failure boundary, started once at process
//! initialization. Each tick deletes messages older than the history
//! window; a failed sweep is logged and the next scheduled run proceeds.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};

use crate::{config::ChatConfig, repository::MessageStore, Result};

#[derive(Clone)]
pub struct RetentionSweeper {
    store: Arc<dyn MessageStore>,
    config: ChatConfig,
}

impl RetentionSweeper {
    #[must_use]
    pub fn new(store: Arc<dyn MessageStore>, config: ChatConfig) -> Self {
        Self { store, config }
    }

    /// Delete every message strictly older than the retention window.
    /// The deletion count is observable only through logging.
    pub async fn sweep_once(&self) -> Result<u64> {
        let cutoff = Utc::now() - chrono::Duration::days(self.config.history_window_days);
        let deleted = self.store.delete_older_than(cutoff).await?;

        info!(
            deleted,
            retention_days = self.config.history_window_days,
            "Retention sweep completed"
        );

        Ok(deleted)
    }

    /// Start the background sweep task, independent of connection handling
    #[must_use]
    pub fn start(&self) -> tokio::task::JoinHandle<()> {
        let sweeper = self.clone();
        let period =
            tokio::time::Duration::from_secs(self.config.sweep_interval_hours * 3600);

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);

            loop {
                interval.tick().await;

                if let Err(e) = sweeper.sweep_once().await {
                    error!(error = %e, "Retention sweep failed");
                }
            }
        })
    }
}

//! Event retention sweep
//!
//! Deletes analytics events older than the configured window in batches so
//! the log never holds a long delete transaction. Disabled when
//! `retention_days` is 0.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};
use tracing::{error, info, warn};

use crate::storage::SeaOrmStorage;

const BATCH_SIZE: u64 = 10_000;
const MAX_ITERATIONS: u32 = 1000;

pub struct EventRetentionTask {
    storage: Arc<SeaOrmStorage>,
    retention_days: u64,
    sweep_interval: StdDuration,
}

impl EventRetentionTask {
    pub fn new(storage: Arc<SeaOrmStorage>, retention_days: u64, sweep_hours: u64) -> Self {
        Self {
            storage,
            retention_days,
            sweep_interval: StdDuration::from_secs(sweep_hours.max(1) * 3600),
        }
    }

    /// Periodic sweep loop; run as a spawned task
    pub async fn start_background_task(&self) {
        loop {
            tokio::time::sleep(self.sweep_interval).await;

            match self.run_sweep().await {
                Ok(deleted) => {
                    if deleted > 0 {
                        info!("Event retention sweep removed {} events", deleted);
                    }
                }
                Err(e) => error!("Event retention sweep failed: {}", e),
            }
        }
    }

    /// Delete expired events in batches; returns the total removed
    pub async fn run_sweep(&self) -> anyhow::Result<u64> {
        if self.retention_days == 0 {
            return Ok(0);
        }

        let cutoff = Utc::now() - Duration::days(self.retention_days as i64);
        let mut total_deleted = 0u64;

        for iteration in 0..MAX_ITERATIONS {
            let deleted = self.storage.delete_events_before(cutoff, BATCH_SIZE).await?;
            total_deleted += deleted;

            if deleted < BATCH_SIZE {
                return Ok(total_deleted);
            }

            if iteration + 1 == MAX_ITERATIONS {
                warn!(
                    "Retention sweep reached max iterations (deleted {} rows)",
                    total_deleted
                );
            }

            // Breathe between batches
            tokio::time::sleep(StdDuration::from_millis(100)).await;
        }

        Ok(total_deleted)
    }
}

//! Analytics service
//!
//! Reads for the owner dashboard. The denormalized counters feed the cheap
//! summary; the detailed view and the reconcile operation go back to the
//! event log.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::info;

use crate::analytics::CounterManager;
use crate::core::{DetailedStats, SummaryStats, aggregate_window, summarize};
use crate::errors::Result;
use crate::storage::{RecountSummary, SeaOrmStorage};

pub const DEFAULT_WINDOW_DAYS: u32 = 7;
pub const MAX_WINDOW_DAYS: u32 = 365;

pub struct AnalyticsService {
    storage: Arc<SeaOrmStorage>,
    counters: CounterManager,
}

impl AnalyticsService {
    pub fn new(storage: Arc<SeaOrmStorage>, counters: CounterManager) -> Self {
        Self { storage, counters }
    }

    /// Headline numbers from the denormalized counters
    pub async fn summary(&self, user_id: i64) -> Result<SummaryStats> {
        let page = self.storage.get_page_by_user(user_id).await?;
        let links = self.storage.get_links(page.id).await?;
        Ok(summarize(&page, &links))
    }

    /// Windowed breakdowns from the event log; `days` defaults to 7 and is
    /// clamped to 1..=365
    pub async fn detailed(&self, user_id: i64, days: Option<u32>) -> Result<DetailedStats> {
        let days = days.unwrap_or(DEFAULT_WINDOW_DAYS).clamp(1, MAX_WINDOW_DAYS);
        let since = Utc::now() - Duration::days(days as i64);

        let page = self.storage.get_page_by_user(user_id).await?;
        let events = self.storage.events_since(page.id, since).await?;
        Ok(aggregate_window(&events))
    }

    /// Rebuild the page/link counters from the event log. Buffered
    /// increments are flushed first so they are not lost to the reset.
    pub async fn reconcile(&self, user_id: i64) -> Result<RecountSummary> {
        let page = self.storage.get_page_by_user(user_id).await?;

        self.counters.flush().await;
        let summary = self.storage.recount_page(page.id).await?;
        self.storage.invalidate_page_cache(&page.username);

        info!(
            "Reconciled counters for '{}': {} views, {} clicks",
            page.username, summary.views, summary.total_clicks
        );
        Ok(summary)
    }
}

//! Analytics event log operations
//!
//! The `analytics_events` table is append-only; the denormalized counters on
//! pages and links are a cache of it, which `recount_page` can rebuild.

use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ColumnTrait, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, TransactionTrait, sea_query::Expr,
};
use tracing::{debug, info};

use super::converters::model_to_event;
use super::{SeaOrmStorage, retry};
use crate::core::types::EventType;
use crate::errors::{MyLinksError, Result};
use crate::storage::models::{AnalyticsEvent, NewEvent, RecountSummary};

use migration::entities::{analytics_event, link, page};

/// Per-link click totals from the aggregate recount query
#[derive(Debug, FromQueryResult)]
struct LinkClickCount {
    link_id: i64,
    clicks: i64,
}

impl SeaOrmStorage {
    pub async fn insert_event(&self, event: NewEvent) -> Result<()> {
        let db = &self.db;
        let model = analytics_event::ActiveModel {
            page_id: Set(event.page_id),
            event_type: Set(event.event_type.to_string()),
            link_id: Set(event.link_id),
            link_title: Set(event.link_title.clone()),
            device: Set(event.device.to_string()),
            browser: Set("unknown".to_string()),
            os: Set("unknown".to_string()),
            country: Set("unknown".to_string()),
            city: Set("unknown".to_string()),
            referrer: Set(event.referrer.clone()),
            created_at: Set(event.created_at),
            ..Default::default()
        };

        retry::with_retry("insert_event", self.retry_config, || async {
            analytics_event::Entity::insert(model.clone()).exec(db).await
        })
        .await
        .map_err(|e| MyLinksError::database_operation(format!("Failed to record event: {}", e)))?;

        Ok(())
    }

    /// Events for one page since `since`, oldest first
    pub async fn events_since(
        &self,
        page_id: i64,
        since: DateTime<Utc>,
    ) -> Result<Vec<AnalyticsEvent>> {
        let db = &self.db;
        let models = retry::with_retry(
            &format!("events_since({})", page_id),
            self.retry_config,
            || async {
                analytics_event::Entity::find()
                    .filter(analytics_event::Column::PageId.eq(page_id))
                    .filter(analytics_event::Column::CreatedAt.gte(since))
                    .order_by_asc(analytics_event::Column::CreatedAt)
                    .order_by_asc(analytics_event::Column::Id)
                    .all(db)
                    .await
            },
        )
        .await
        .map_err(|e| MyLinksError::database_operation(format!("Failed to load events: {}", e)))?;

        Ok(models.into_iter().map(model_to_event).collect())
    }

    /// Rebuild the denormalized counters for one page from the event log
    pub async fn recount_page(&self, page_id: i64) -> Result<RecountSummary> {
        let views = analytics_event::Entity::find()
            .filter(analytics_event::Column::PageId.eq(page_id))
            .filter(analytics_event::Column::EventType.eq(EventType::View.to_string()))
            .count(&self.db)
            .await
            .map_err(|e| {
                MyLinksError::database_operation(format!("Failed to count views: {}", e))
            })?;

        let per_link: Vec<LinkClickCount> = analytics_event::Entity::find()
            .filter(analytics_event::Column::PageId.eq(page_id))
            .filter(analytics_event::Column::EventType.eq(EventType::Click.to_string()))
            .filter(analytics_event::Column::LinkId.is_not_null())
            .select_only()
            .column(analytics_event::Column::LinkId)
            .column_as(analytics_event::Column::Id.count(), "clicks")
            .group_by(analytics_event::Column::LinkId)
            .into_model::<LinkClickCount>()
            .all(&self.db)
            .await
            .map_err(|e| {
                MyLinksError::database_operation(format!("Failed to count clicks: {}", e))
            })?;

        let total_clicks: u64 = per_link.iter().map(|c| c.clicks.max(0) as u64).sum();

        let txn = self.db.begin().await.map_err(|e| {
            MyLinksError::database_operation(format!("Failed to begin transaction: {}", e))
        })?;

        page::Entity::update_many()
            .col_expr(page::Column::Views, Expr::value(views as i64))
            .filter(page::Column::Id.eq(page_id))
            .exec(&txn)
            .await
            .map_err(|e| {
                MyLinksError::database_operation(format!("Failed to reset page views: {}", e))
            })?;

        // Zero everything first so links with no surviving click events
        // don't keep stale counts
        link::Entity::update_many()
            .col_expr(link::Column::Clicks, Expr::value(0_i64))
            .filter(link::Column::PageId.eq(page_id))
            .exec(&txn)
            .await
            .map_err(|e| {
                MyLinksError::database_operation(format!("Failed to reset link clicks: {}", e))
            })?;

        for count in &per_link {
            link::Entity::update_many()
                .col_expr(link::Column::Clicks, Expr::value(count.clicks))
                .filter(link::Column::Id.eq(count.link_id))
                .filter(link::Column::PageId.eq(page_id))
                .exec(&txn)
                .await
                .map_err(|e| {
                    MyLinksError::database_operation(format!("Failed to set link clicks: {}", e))
                })?;
        }

        txn.commit().await.map_err(|e| {
            MyLinksError::database_operation(format!("Failed to commit transaction: {}", e))
        })?;

        info!(
            "Recounted page {}: {} views, {} clicks across {} links",
            page_id,
            views,
            total_clicks,
            per_link.len()
        );

        Ok(RecountSummary {
            views,
            total_clicks,
            links_updated: per_link.len(),
        })
    }

    /// Delete up to `batch_size` events older than `cutoff`; returns the
    /// number of rows removed. Id-list deletes keep this portable across
    /// backends without DELETE...LIMIT support.
    pub async fn delete_events_before(
        &self,
        cutoff: DateTime<Utc>,
        batch_size: u64,
    ) -> Result<u64> {
        let ids: Vec<i64> = analytics_event::Entity::find()
            .filter(analytics_event::Column::CreatedAt.lt(cutoff))
            .select_only()
            .column(analytics_event::Column::Id)
            .limit(batch_size)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| {
                MyLinksError::database_operation(format!("Failed to find expired events: {}", e))
            })?;

        if ids.is_empty() {
            return Ok(0);
        }

        let result = analytics_event::Entity::delete_many()
            .filter(analytics_event::Column::Id.is_in(ids))
            .exec(&self.db)
            .await
            .map_err(|e| {
                MyLinksError::database_operation(format!("Failed to delete expired events: {}", e))
            })?;

        debug!("Retention sweep removed {} events", result.rows_affected);
        Ok(result.rows_affected)
    }
}

//! CounterSink implementation for SeaOrmStorage
//!
//! Buffered view/click increments are applied as two batched UPDATEs, one
//! per table, each a single CASE WHEN expression over the touched ids.
//! Increments are additive (`col = col + n`), so concurrent flushes from
//! several instances never clobber each other.

use async_trait::async_trait;
use sea_orm::sea_query::{CaseStatement, Expr, Query};
use sea_orm::{ConnectionTrait, ExprTrait};
use tracing::debug;

use super::SeaOrmStorage;
use super::retry;
use crate::analytics::{CounterKey, CounterSink};

use migration::entities::{link, page};

#[async_trait]
impl CounterSink for SeaOrmStorage {
    async fn flush_counters(&self, updates: Vec<(CounterKey, u64)>) -> anyhow::Result<()> {
        if updates.is_empty() {
            return Ok(());
        }

        let mut page_views: Vec<(i64, u64)> = Vec::new();
        let mut link_clicks: Vec<(i64, u64)> = Vec::new();
        for (key, count) in &updates {
            match key {
                CounterKey::PageView(page_id) => page_views.push((*page_id, *count)),
                CounterKey::LinkClick(link_id) => link_clicks.push((*link_id, *count)),
            }
        }

        if !page_views.is_empty() {
            let mut case_stmt = CaseStatement::new();
            let mut ids: Vec<i64> = Vec::with_capacity(page_views.len());

            for (id, count) in &page_views {
                case_stmt = case_stmt.case(
                    Expr::col(page::Column::Id).eq(Expr::val(*id)),
                    Expr::col(page::Column::Views).add(Expr::val(*count as i64)),
                );
                ids.push(*id);
            }
            case_stmt = case_stmt.finally(Expr::col(page::Column::Views));

            let stmt = Query::update()
                .table(page::Entity)
                .value(page::Column::Views, case_stmt)
                .and_where(Expr::col(page::Column::Id).is_in(ids))
                .to_owned();

            let db = &self.db;
            let stmt_ref = &stmt;
            retry::with_retry("flush_counters(views)", self.retry_config, || async {
                db.execute(stmt_ref).await
            })
            .await
            .map_err(|e| {
                anyhow::anyhow!(
                    "Failed to batch update page views (still failed after retries): {}",
                    e
                )
            })?;
        }

        if !link_clicks.is_empty() {
            let mut case_stmt = CaseStatement::new();
            let mut ids: Vec<i64> = Vec::with_capacity(link_clicks.len());

            for (id, count) in &link_clicks {
                case_stmt = case_stmt.case(
                    Expr::col(link::Column::Id).eq(Expr::val(*id)),
                    Expr::col(link::Column::Clicks).add(Expr::val(*count as i64)),
                );
                ids.push(*id);
            }
            case_stmt = case_stmt.finally(Expr::col(link::Column::Clicks));

            let stmt = Query::update()
                .table(link::Entity)
                .value(link::Column::Clicks, case_stmt)
                .and_where(Expr::col(link::Column::Id).is_in(ids))
                .to_owned();

            let db = &self.db;
            let stmt_ref = &stmt;
            retry::with_retry("flush_counters(clicks)", self.retry_config, || async {
                db.execute(stmt_ref).await
            })
            .await
            .map_err(|e| {
                anyhow::anyhow!(
                    "Failed to batch update link clicks (still failed after retries): {}",
                    e
                )
            })?;
        }

        debug!(
            "Counters flushed to {} database ({} page rows, {} link rows)",
            self.backend_name.to_uppercase(),
            page_views.len(),
            link_clicks.len()
        );

        Ok(())
    }
}

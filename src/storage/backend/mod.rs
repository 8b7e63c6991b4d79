//! SeaORM storage backend
//!
//! Persistence for pages, links, content blocks and the analytics event log,
//! backed by SQLite, MySQL/MariaDB or PostgreSQL.

mod connection;
mod converters;
mod counter_sink;
mod events;
mod pages;
pub mod retry;

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;
use sea_orm::DatabaseConnection;
use tracing::warn;

use crate::analytics::CounterSink;
use crate::errors::{MyLinksError, Result};
use crate::storage::models::PageBundle;

pub use connection::{connect_generic, connect_sqlite, run_migrations};

/// Infer the database backend from the connection URL
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite://")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(MyLinksError::database_config(format!(
            "Cannot infer database backend from URL: {}. Supported schemes: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// SeaORM-based storage backend
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
    /// Assembled public-page bundles keyed by username (short TTL)
    page_cache: Cache<String, Arc<PageBundle>>,
    retry_config: retry::RetryConfig,
}

impl SeaOrmStorage {
    pub async fn new(database_url: &str, backend_name: &str) -> Result<Self> {
        if database_url.is_empty() {
            return Err(MyLinksError::database_config(
                "DATABASE_URL is not set".to_string(),
            ));
        }

        let config = crate::config::get_config();
        let retry_config = retry::RetryConfig {
            max_retries: config.database.retry_count,
            base_delay_ms: config.database.retry_base_delay_ms,
            max_delay_ms: config.database.retry_max_delay_ms,
        };

        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url).await?
        } else {
            connect_generic(database_url, backend_name).await?
        };

        let storage = SeaOrmStorage {
            db,
            backend_name: backend_name.to_string(),
            page_cache: Cache::builder()
                .time_to_live(Duration::from_secs(config.analytics.page_cache_ttl_secs))
                .max_capacity(config.analytics.page_cache_capacity)
                .build(),
            retry_config,
        };

        run_migrations(&storage.db).await?;

        warn!(
            "{} Storage initialized.",
            storage.backend_name.to_uppercase()
        );
        Ok(storage)
    }

    pub fn backend_name(&self) -> &str {
        &self.backend_name
    }

    pub fn as_counter_sink(&self) -> Arc<dyn CounterSink> {
        Arc::new(self.clone()) as Arc<dyn CounterSink>
    }

    pub fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Drop the cached bundle for one page (called after owner mutations)
    pub fn invalidate_page_cache(&self, username: &str) {
        self.page_cache.invalidate(&username.to_lowercase());
    }
}

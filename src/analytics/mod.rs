pub mod manager;
pub mod retention;

pub use manager::CounterManager;
pub use retention::EventRetentionTask;

/// Key for one buffered counter increment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CounterKey {
    /// Page view counter, keyed by page id
    PageView(i64),
    /// Link click counter, keyed by link id
    LinkClick(i64),
}

/// Counter flush target (aggregated mode)
#[async_trait::async_trait]
pub trait CounterSink: Send + Sync {
    async fn flush_counters(&self, updates: Vec<(CounterKey, u64)>) -> anyhow::Result<()>;
}

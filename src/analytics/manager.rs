//! Buffered counter manager
//!
//! View and click increments land in an in-memory buffer and are flushed to
//! the storage sink on a timer or when the buffer crosses a threshold, so a
//! burst of traffic never turns into a burst of row updates.

use dashmap::DashMap;
use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};
use tokio::sync::Mutex;
use tokio::time::{Duration, sleep};
use tracing::{debug, trace, warn};

use crate::analytics::{CounterKey, CounterSink};

/// Counter buffer state
struct CounterBuffer {
    data: DashMap<CounterKey, u64>,
    /// Total buffered increments, for the threshold check
    total: AtomicUsize,
    /// Flush lock, prevents concurrent flushes
    flush_lock: Mutex<()>,
    /// A threshold flush is already queued
    flush_pending: AtomicBool,
}

impl CounterBuffer {
    fn new() -> Self {
        Self {
            data: DashMap::new(),
            total: AtomicUsize::new(0),
            flush_lock: Mutex::new(()),
            flush_pending: AtomicBool::new(false),
        }
    }

    fn increment(&self, key: CounterKey) -> usize {
        self.data.entry(key).and_modify(|v| *v += 1).or_insert(1);
        trace!("CounterBuffer: incremented {:?}", key);
        self.total.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Collect all updates and empty the buffer (per-key remove so
    /// increments landing mid-drain are kept for the next flush)
    fn drain(&self) -> Vec<(CounterKey, u64)> {
        let keys: Vec<CounterKey> = self.data.iter().map(|r| *r.key()).collect();

        let mut updates = Vec::with_capacity(keys.len());
        let mut total_removed = 0u64;
        for key in keys {
            if let Some((k, v)) = self.data.remove(&key) {
                total_removed += v;
                updates.push((k, v));
            }
        }

        if total_removed > 0 {
            self.total
                .fetch_update(Ordering::Release, Ordering::Relaxed, |current| {
                    Some(current.saturating_sub(total_removed as usize))
                })
                .ok();
        }

        updates
    }

    /// Put updates back after a failed flush
    fn restore(&self, updates: Vec<(CounterKey, u64)>) {
        let mut restored_total = 0u64;
        for (k, v) in updates {
            *self.data.entry(k).or_insert(0) += v;
            restored_total += v;
        }
        self.total
            .fetch_add(restored_total as usize, Ordering::Relaxed);
    }

    fn total(&self) -> usize {
        self.total.load(Ordering::Relaxed)
    }
}

/// Collects view/click increments and periodically flushes them to the
/// storage sink. All state lives inside the struct, so tests can run their
/// own instances.
#[derive(Clone)]
pub struct CounterManager {
    buffer: Arc<CounterBuffer>,
    sink: Arc<dyn CounterSink>,
    flush_interval: Duration,
    max_buffered_before_flush: usize,
}

impl CounterManager {
    pub fn new(
        sink: Arc<dyn CounterSink>,
        flush_interval: Duration,
        max_buffered_before_flush: usize,
    ) -> Self {
        Self {
            buffer: Arc::new(CounterBuffer::new()),
            sink,
            flush_interval,
            max_buffered_before_flush,
        }
    }

    /// Record one increment (thread safe, lock free)
    pub fn increment(&self, key: CounterKey) {
        let current_size = self.buffer.increment(key);
        trace!("CounterManager: current buffer size: {}", current_size);

        if current_size >= self.max_buffered_before_flush {
            // compare_exchange so only one caller spawns the flush task
            if self
                .buffer
                .flush_pending
                .compare_exchange(false, true, Ordering::SeqCst, Ordering::Relaxed)
                .is_ok()
            {
                let buffer = Arc::clone(&self.buffer);
                let sink = Arc::clone(&self.sink);
                tokio::spawn(async move {
                    if let Ok(_guard) = buffer.flush_lock.try_lock() {
                        Self::flush_buffer(&buffer, &sink).await;
                    } else {
                        trace!("CounterManager: flush already in progress, skipping");
                    }
                    buffer.flush_pending.store(false, Ordering::Release);
                });
            }
        }
    }

    /// Periodic flush loop; run as a spawned task
    pub async fn start_background_task(&self) {
        loop {
            sleep(self.flush_interval).await;

            debug!("CounterManager: Triggering scheduled flush");
            if let Ok(_guard) = self.buffer.flush_lock.try_lock() {
                Self::flush_buffer(&self.buffer, &self.sink).await;
            } else {
                trace!("CounterManager: flush already in progress, skipping scheduled flush");
            }
        }
    }

    /// Flush now, blocking until done
    pub async fn flush(&self) {
        debug!("CounterManager: Manual flush triggered");
        let _guard = self.buffer.flush_lock.lock().await;
        Self::flush_buffer(&self.buffer, &self.sink).await;
    }

    async fn flush_buffer(buffer: &CounterBuffer, sink: &Arc<dyn CounterSink>) {
        let updates = buffer.drain();

        if updates.is_empty() {
            trace!("CounterManager: No counters to flush");
            return;
        }

        let count = updates.len();
        match sink.flush_counters(updates.clone()).await {
            Ok(_) => {
                debug!("CounterManager: Successfully flushed {} entries", count);
            }
            Err(e) => {
                buffer.restore(updates);
                warn!(
                    "CounterManager: flush_counters failed: {}, {} entries restored to buffer",
                    e, count
                );
            }
        }
    }

    /// Total buffered increments (for monitoring)
    pub fn buffer_size(&self) -> usize {
        self.buffer.total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct MockSink {
        flushed: std::sync::Mutex<Vec<(CounterKey, u64)>>,
    }

    impl MockSink {
        fn new() -> Self {
            Self {
                flushed: std::sync::Mutex::new(Vec::new()),
            }
        }

        fn get_flushed(&self) -> Vec<(CounterKey, u64)> {
            self.flushed.lock().unwrap().clone()
        }

        fn total(&self) -> u64 {
            self.flushed.lock().unwrap().iter().map(|(_, v)| v).sum()
        }
    }

    #[async_trait]
    impl CounterSink for MockSink {
        async fn flush_counters(&self, updates: Vec<(CounterKey, u64)>) -> anyhow::Result<()> {
            self.flushed.lock().unwrap().extend(updates);
            Ok(())
        }
    }

    struct FailingSink;

    #[async_trait]
    impl CounterSink for FailingSink {
        async fn flush_counters(&self, _updates: Vec<(CounterKey, u64)>) -> anyhow::Result<()> {
            Err(anyhow::anyhow!("sink unavailable"))
        }
    }

    #[tokio::test]
    async fn test_increment_and_flush() {
        let sink = Arc::new(MockSink::new());
        let manager = CounterManager::new(
            Arc::clone(&sink) as Arc<dyn CounterSink>,
            Duration::from_secs(60),
            100,
        );

        manager.increment(CounterKey::PageView(1));
        manager.increment(CounterKey::PageView(1));
        manager.increment(CounterKey::LinkClick(7));

        // buffer_size() counts increments, not unique keys
        assert_eq!(manager.buffer_size(), 3);

        manager.flush().await;

        assert_eq!(manager.buffer_size(), 0);
        let flushed = sink.get_flushed();
        assert_eq!(flushed.len(), 2);
        assert!(flushed.contains(&(CounterKey::PageView(1), 2)));
        assert!(flushed.contains(&(CounterKey::LinkClick(7), 1)));
    }

    #[tokio::test]
    async fn test_failed_flush_restores_buffer() {
        let manager = CounterManager::new(
            Arc::new(FailingSink) as Arc<dyn CounterSink>,
            Duration::from_secs(60),
            100,
        );

        manager.increment(CounterKey::PageView(1));
        manager.increment(CounterKey::LinkClick(2));
        manager.flush().await;

        // Nothing was lost
        assert_eq!(manager.buffer_size(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_increment() {
        let sink = Arc::new(MockSink::new());
        let manager = Arc::new(CounterManager::new(
            Arc::clone(&sink) as Arc<dyn CounterSink>,
            Duration::from_secs(60),
            100000,
        ));

        const NUM_TASKS: usize = 10;
        const INCREMENTS_PER_TASK: usize = 1000;

        let mut handles = vec![];
        for _ in 0..NUM_TASKS {
            let mgr = Arc::clone(&manager);
            handles.push(tokio::spawn(async move {
                for _ in 0..INCREMENTS_PER_TASK {
                    mgr.increment(CounterKey::LinkClick(42));
                }
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(manager.buffer_size(), NUM_TASKS * INCREMENTS_PER_TASK);

        manager.flush().await;

        assert_eq!(sink.total(), (NUM_TASKS * INCREMENTS_PER_TASK) as u64);
    }
}

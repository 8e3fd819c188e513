//! Bounded worker pool for store and model calls.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;

use lexgraph_core::errors::{LexGraphResult, RetrievalError};

/// Process-wide cap on in-flight graph, vector, and model calls.
///
/// Clones share the same permits, so one pool can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct WorkerPool {
    permits: Arc<Semaphore>,
    size: usize,
}

impl WorkerPool {
    pub fn new(num_workers: usize) -> Self {
        let size = num_workers.max(1);
        Self {
            permits: Arc::new(Semaphore::new(size)),
            size,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Permits not currently held.
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    /// Run one unit of work while holding a permit.
    pub async fn run<F, T>(&self, work: F) -> LexGraphResult<T>
    where
        F: Future<Output = LexGraphResult<T>>,
    {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| RetrievalError::Cancelled { elapsed_ms: 0 })?;
        work.await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn never_exceeds_size() {
        let pool = WorkerPool::new(2);
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let jobs = (0..8).map(|_| {
            let in_flight = in_flight.clone();
            let peak = peak.clone();
            pool.run(async move {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(5)).await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
                Ok(())
            })
        });
        let results = futures::future::join_all(jobs).await;

        assert!(results.iter().all(|r| r.is_ok()));
        assert_eq!(peak.load(Ordering::SeqCst), 2);
        assert_eq!(pool.available(), 2);
    }

    #[test]
    fn zero_workers_is_clamped() {
        assert_eq!(WorkerPool::new(0).size(), 1);
    }
}

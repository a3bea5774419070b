use futures::stream::{FuturesUnordered, StreamExt};
use indicatif::ProgressBar;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Semaphore-bounded task pool.
///
/// Submission waits only for a free slot; results come back in completion order.
pub struct ConcurrentProbe {
    semaphore: Arc<Semaphore>,
    completed: Arc<AtomicUsize>,
    errors: Arc<AtomicUsize>,
    progress: Option<ProgressBar>,
}

impl ConcurrentProbe {
    pub fn new(concurrency: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(concurrency.max(1))),
            completed: Arc::new(AtomicUsize::new(0)),
            errors: Arc::new(AtomicUsize::new(0)),
            progress: None,
        }
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Run `task_fn` over every task with at most `concurrency` in flight.
    pub async fn execute<T, F, Fut>(&self, tasks: Vec<T>, task_fn: F) -> Vec<Fut::Output>
    where
        F: Fn(T) -> Fut + Clone + Send + 'static,
        Fut: std::future::Future + Send + 'static,
        Fut::Output: Send + 'static,
        T: Send + 'static,
    {
        let mut futures = FuturesUnordered::new();

        for task in tasks {
            let permit = match self.semaphore.clone().acquire_owned().await {
                Ok(p) => p,
                Err(_) => {
                    tracing::error!("worker pool closed, dropping remaining tasks");
                    break;
                }
            };
            let task_fn = task_fn.clone();
            let completed = self.completed.clone();
            let progress = self.progress.clone();

            futures.push(tokio::spawn(async move {
                let result = task_fn(task).await;
                completed.fetch_add(1, Ordering::Relaxed);
                if let Some(pb) = progress {
                    pb.inc(1);
                }
                drop(permit);
                result
            }));
        }

        let mut results = Vec::new();
        while let Some(joined) = futures.next().await {
            match joined {
                Ok(output) => results.push(output),
                Err(e) => {
                    self.errors.fetch_add(1, Ordering::Relaxed);
                    tracing::warn!("worker task failed: {}", e);
                }
            }
        }

        results
    }

    /// (completed, failed) task counts.
    pub fn get_stats(&self) -> (usize, usize) {
        (self.completed.load(Ordering::Relaxed), self.errors.load(Ordering::Relaxed))
    }
}

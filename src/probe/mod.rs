pub mod http_probe;

pub use http_probe::{check_domain_status, ProbeResult};

use indicatif::ProgressBar;
use std::sync::Arc;
use std::time::Duration;

use crate::concurrent::ConcurrentProbe;
use crate::config::CheckOptions;
use crate::http_client::HeadTransport;

/// Reachability sweep over a list of hosts.
pub struct Prober<T> {
    transport: Arc<T>,
    opts: CheckOptions,
    progress: Option<ProgressBar>,
}

impl<T: HeadTransport + 'static> Prober<T> {
    pub fn new(transport: T, opts: CheckOptions) -> Self {
        Self::from_shared(Arc::new(transport), opts)
    }

    pub fn from_shared(transport: Arc<T>, opts: CheckOptions) -> Self {
        Self { transport, opts, progress: None }
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Check every domain with at most `max_workers` checks in flight.
    ///
    /// Results are in completion order, one per domain. Never fails.
    pub async fn check_all(&self, domains: &[String]) -> Vec<ProbeResult> {
        let mut pool = ConcurrentProbe::new(self.opts.max_workers);
        if let Some(pb) = &self.progress {
            pool = pool.with_progress(pb.clone());
        }
        let transport = self.transport.clone();
        let timeout = Duration::from_secs(self.opts.timeout_secs);

        tracing::info!(
            "Starting status checks: {} domains with {} workers",
            domains.len(),
            self.opts.max_workers
        );
        let results = pool
            .execute(domains.to_vec(), move |domain: String| {
                let transport = transport.clone();
                async move { check_domain_status(transport.as_ref(), &domain, timeout).await }
            })
            .await;

        let (completed, failed) = pool.get_stats();
        tracing::info!("Status checks finished: {} completed, {} worker failures", completed, failed);
        results
    }
}

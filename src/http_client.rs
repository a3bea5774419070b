use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

use crate::error::{Result, ScraperError};

pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Maximum redirect hops followed by both the search query and the probes.
pub const MAX_REDIRECTS: usize = 30;

/// Final state of a HEAD request after redirects were followed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadResponse {
    pub status: u16,
    pub final_url: String,
}

/// GET seam used by the certificate log adapters.
#[async_trait]
pub trait SearchTransport: Send + Sync {
    /// Fetch `url` and return its body. Non-2xx answers are errors.
    async fn get_text(&self, url: &str, timeout: Duration) -> Result<String>;
}

/// HEAD seam used by the prober.
#[async_trait]
pub trait HeadTransport: Send + Sync {
    async fn head(&self, url: &str) -> Result<HeadResponse>;
}

/// Client for the single crt.sh query; crt.sh answers slowly for large domains.
pub fn create_search_client(timeout_secs: u64) -> Result<Client> {
    base_builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(ScraperError::Client)
}

/// Client shared by all probe workers.
pub fn create_probe_client(timeout_secs: u64, max_workers: usize) -> Result<Client> {
    base_builder()
        // Connection pooling - one idle slot per worker is plenty
        .pool_max_idle_per_host(max_workers)
        .pool_idle_timeout(Some(Duration::from_secs(90)))
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
        .build()
        .map_err(ScraperError::Client)
}

fn base_builder() -> ClientBuilder {
    ClientBuilder::new()
        .tcp_nodelay(true)
        .gzip(true)
        .brotli(true)
        .use_rustls_tls()
        .https_only(false)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .user_agent(BROWSER_USER_AGENT)
}

#[async_trait]
impl SearchTransport for Client {
    async fn get_text(&self, url: &str, timeout: Duration) -> Result<String> {
        let resp = self
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| ScraperError::Fetch { url: url.to_string(), reason: e.to_string() })?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ScraperError::Status { url: url.to_string(), status: status.as_u16() });
        }
        resp.text()
            .await
            .map_err(|e| ScraperError::Fetch { url: url.to_string(), reason: e.to_string() })
    }
}

#[async_trait]
impl HeadTransport for Client {
    async fn head(&self, url: &str) -> Result<HeadResponse> {
        let resp = self
            .head(url)
            .send()
            .await
            .map_err(|e| ScraperError::Probe { url: url.to_string(), reason: e.to_string() })?;
        Ok(HeadResponse { status: resp.status().as_u16(), final_url: resp.url().to_string() })
    }
}

use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::http_client::HeadTransport;

/// Schemes tried in order; the plain one only runs when the secure one fails.
const SCHEMES: [&str; 2] = ["https", "http"];

/// Outcome of checking one host. `status_code == 0` means both attempts failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeResult {
    pub domain: String,
    pub attempted_url: String,
    pub status_code: u16,
    pub redirected: bool,
    pub final_host: Option<String>,
    pub final_url: Option<String>,
}

impl ProbeResult {
    pub fn is_reachable(&self) -> bool {
        self.status_code != 0
    }
}

fn extract_host(url: &str) -> Option<String> {
    Url::parse(url).ok().and_then(|u| u.host_str().map(|s| s.to_string()))
}

/// HEAD `https://<domain>/`, then `http://<domain>/` if that fails.
///
/// Each attempt is bounded by `timeout`. Errors never escape; they end up as
/// a zero status on the returned result.
pub async fn check_domain_status<T>(transport: &T, domain: &str, timeout: Duration) -> ProbeResult
where
    T: HeadTransport + ?Sized,
{
    let mut attempted_url = String::new();
    for scheme in SCHEMES {
        let url = format!("{}://{}/", scheme, domain);
        attempted_url = url.clone();

        match tokio::time::timeout(timeout, transport.head(&url)).await {
            Ok(Ok(resp)) => {
                let requested_host = extract_host(&url);
                let final_host = extract_host(&resp.final_url);
                let redirected = final_host.is_some() && final_host != requested_host;
                tracing::debug!("{} -> {} ({})", url, resp.status, resp.final_url);
                return ProbeResult {
                    domain: domain.to_string(),
                    attempted_url,
                    status_code: resp.status,
                    redirected,
                    final_host,
                    final_url: Some(resp.final_url),
                };
            }
            Ok(Err(e)) => tracing::debug!("{} -> Error: {}", url, e),
            Err(_) => tracing::debug!("{} -> timed out after {:?}", url, timeout),
        }
    }

    ProbeResult {
        domain: domain.to_string(),
        attempted_url,
        status_code: 0,
        redirected: false,
        final_host: None,
        final_url: None,
    }
}

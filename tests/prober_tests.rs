use async_trait::async_trait;
use crt_scraper::config::CheckOptions;
use crt_scraper::error::{Result, ScraperError};
use crt_scraper::http_client::{HeadResponse, HeadTransport};
use crt_scraper::probe::Prober;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Counts concurrently active HEAD calls and remembers the peak.
#[derive(Default)]
struct Instrumented {
    active: AtomicUsize,
    peak: AtomicUsize,
    calls: AtomicUsize,
}

#[async_trait]
impl HeadTransport for Instrumented {
    async fn head(&self, url: &str) -> Result<HeadResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(15)).await;
        self.active.fetch_sub(1, Ordering::SeqCst);

        if url.contains("down") {
            return Err(ScraperError::Probe { url: url.to_string(), reason: "refused".into() });
        }
        if url.starts_with("https://plain") {
            return Err(ScraperError::Probe { url: url.to_string(), reason: "tls handshake".into() });
        }
        Ok(HeadResponse { status: 200, final_url: url.to_string() })
    }
}

fn domains(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("host{}.example.com", i)).collect()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn never_exceeds_worker_bound() {
    let prober = Prober::new(Instrumented::default(), CheckOptions { max_workers: 4, timeout_secs: 5 });
    let results = prober.check_all(&domains(30)).await;

    assert_eq!(results.len(), 30);
    assert!(results.iter().all(|r| r.status_code == 200));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn peak_concurrency_is_bounded() {
    let transport = std::sync::Arc::new(Instrumented::default());
    let prober = Prober::from_shared(transport.clone(), CheckOptions { max_workers: 3, timeout_secs: 5 });
    prober.check_all(&domains(20)).await;

    let peak = transport.peak.load(Ordering::SeqCst);
    assert!(peak <= 3, "peak in-flight was {}", peak);
    assert!(peak >= 1);
    assert_eq!(transport.calls.load(Ordering::SeqCst), 20);
}

#[tokio::test]
async fn failures_are_results() {
    let transport = std::sync::Arc::new(Instrumented::default());
    let prober = Prober::from_shared(transport.clone(), CheckOptions { max_workers: 2, timeout_secs: 5 });
    let list = vec![
        "down.example.com".to_string(),
        "plain.example.com".to_string(),
        "www.example.com".to_string(),
    ];
    let mut results = prober.check_all(&list).await;
    results.sort_by(|a, b| a.domain.cmp(&b.domain));

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].domain, "down.example.com");
    assert_eq!(results[0].status_code, 0);
    assert_eq!(results[1].status_code, 200);
    assert_eq!(results[1].attempted_url, "http://plain.example.com/");
    assert_eq!(results[2].attempted_url, "https://www.example.com/");
    // down: 2 attempts, plain: 2 attempts, www: 1 attempt
    assert_eq!(transport.calls.load(Ordering::SeqCst), 5);
}

#[tokio::test]
async fn empty_input_gives_empty_output() {
    let prober = Prober::new(Instrumented::default(), CheckOptions::default());
    assert!(prober.check_all(&[]).await.is_empty());
}

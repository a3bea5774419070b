use async_trait::async_trait;
use crt_scraper::config::SearchOptions;
use crt_scraper::discover::crtsh::{search_url, CrtSh, SourceFormat, CRTSH_BASE_URL};
use crt_scraper::error::{Result, ScraperError};
use crt_scraper::http_client::SearchTransport;
use parking_lot::Mutex;
use std::time::Duration;

const HTML_PAGE: &str = r#"<table>
<tr><td>1</td><td>2</td><td>3</td><td>4</td><td>example.com</td><td>www.example.com<br>*.api.example.com</td><td>CA</td></tr>
</table>"#;

/// Serves canned bodies per format and records every requested URL with its timeout.
struct FakeCrtSh {
    json: Option<&'static str>,
    html: Option<&'static str>,
    calls: Mutex<Vec<(String, Duration)>>,
}

impl FakeCrtSh {
    fn new(json: Option<&'static str>, html: Option<&'static str>) -> Self {
        Self { json, html, calls: Mutex::new(Vec::new()) }
    }

    fn urls(&self) -> Vec<String> {
        self.calls.lock().iter().map(|(u, _)| u.clone()).collect()
    }
}

#[async_trait]
impl SearchTransport for FakeCrtSh {
    async fn get_text(&self, url: &str, timeout: Duration) -> Result<String> {
        self.calls.lock().push((url.to_string(), timeout));
        let body = if url.contains("output=json") { self.json } else { self.html };
        body.map(str::to_string)
            .ok_or_else(|| ScraperError::Status { url: url.to_string(), status: 503 })
    }
}

fn opts() -> SearchOptions {
    SearchOptions {
        domain: "example.com".into(),
        include_wildcard: true,
        exclude_expired: true,
        timeout_secs: 12,
    }
}

#[tokio::test]
async fn json_success_makes_one_call() {
    let crt = CrtSh::new(FakeCrtSh::new(Some(r#"[{"name_value":"b.example.com\na.example.com"}]"#), None));
    let found = crt.domains(&opts(), SourceFormat::Json).await;

    assert_eq!(found, vec!["a.example.com", "b.example.com"]);
    assert_eq!(crt.transport().urls(), vec![search_url(CRTSH_BASE_URL, &opts(), SourceFormat::Json)]);
}

#[tokio::test]
async fn malformed_json_falls_back_to_html_once() {
    let crt = CrtSh::new(FakeCrtSh::new(Some("<html>rate limited</html>"), Some(HTML_PAGE)));
    let found = crt.domains(&opts(), SourceFormat::Json).await;

    assert_eq!(found, vec!["api.example.com", "www.example.com"]);
    let calls = crt.transport().calls.lock().clone();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].0, search_url(CRTSH_BASE_URL, &opts(), SourceFormat::Json));
    assert_eq!(calls[1].0, search_url(CRTSH_BASE_URL, &opts(), SourceFormat::Html));
    assert_eq!(calls[1].0, "https://crt.sh/?q=%25.example.com&exclude=expired");
    assert!(calls.iter().all(|(_, t)| *t == Duration::from_secs(12)));
}

#[tokio::test]
async fn fallback_never_recurses() {
    let crt = CrtSh::new(FakeCrtSh::new(None, None));
    let found = crt.domains(&opts(), SourceFormat::Json).await;

    assert!(found.is_empty());
    assert_eq!(crt.transport().urls().len(), 2);
}

#[tokio::test]
async fn html_failure_is_empty_not_fatal() {
    let crt = CrtSh::new(FakeCrtSh::new(Some("[]"), None));
    assert!(crt.domains(&opts(), SourceFormat::Html).await.is_empty());
    assert_eq!(crt.transport().urls(), vec!["https://crt.sh/?q=%25.example.com&exclude=expired".to_string()]);
}

#[tokio::test]
async fn custom_base_url_is_used() {
    let crt = CrtSh::with_base_url(FakeCrtSh::new(None, Some(HTML_PAGE)), "http://127.0.0.1:9/");
    let plain = SearchOptions::new("example.com");
    crt.domains(&plain, SourceFormat::Html).await;
    assert_eq!(crt.transport().urls(), vec!["http://127.0.0.1:9/?q=example.com".to_string()]);
}

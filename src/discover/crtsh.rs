use scraper::{Html, Selector};
use std::time::Duration;

use crate::config::SearchOptions;
use crate::discover::normalize::{extract_into, DomainSet};
use crate::error::{Result, ScraperError};
use crate::http_client::SearchTransport;

pub const CRTSH_BASE_URL: &str = "https://crt.sh/";

/// Zero-based column of "Matching Identities" in the crt.sh results table.
const NAME_CELL: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Html,
    Json,
}

/// Build the crt.sh query URL for `opts`.
pub fn search_url(base: &str, opts: &SearchOptions, format: SourceFormat) -> String {
    let term = if opts.include_wildcard {
        format!("%.{}", opts.domain)
    } else {
        opts.domain.clone()
    };
    let mut url = format!("{}?q={}", base, urlencoding::encode(&term));
    if format == SourceFormat::Json {
        url.push_str("&output=json");
    }
    if opts.exclude_expired {
        url.push_str("&exclude=expired");
    }
    url
}

/// Pull the name cell out of every results row and normalise it.
pub fn parse_html(body: &str, target: &str) -> DomainSet {
    let mut set = DomainSet::new();
    let (Ok(row_sel), Ok(cell_sel)) = (Selector::parse("tr"), Selector::parse("td")) else {
        return set;
    };
    let document = Html::parse_document(body);
    for row in document.select(&row_sel) {
        let cells: Vec<_> = row.select(&cell_sel).collect();
        if cells.len() <= NAME_CELL {
            continue;
        }
        // names in this cell are separated by <br>, which yields separate text nodes
        let text = cells[NAME_CELL].text().collect::<Vec<_>>().join("\n");
        let text = text.trim();
        if !text.is_empty() {
            extract_into(text, target, &mut set);
        }
    }
    set
}

/// Normalise the `name_value` field of every record in a crt.sh JSON array.
pub fn parse_json(body: &str, target: &str) -> Result<DomainSet> {
    let v: serde_json::Value = serde_json::from_str(body)?;
    let arr = v
        .as_array()
        .ok_or_else(|| ScraperError::Parse("expected a JSON array of certificate records".into()))?;
    let mut set = DomainSet::new();
    for item in arr {
        if let Some(name) = item.get("name_value").and_then(|n| n.as_str()) {
            if !name.is_empty() {
                extract_into(name, target, &mut set);
            }
        }
    }
    Ok(set)
}

/// Certificate transparency search against crt.sh.
pub struct CrtSh<T> {
    transport: T,
    base_url: String,
}

impl<T: SearchTransport> CrtSh<T> {
    pub fn new(transport: T) -> Self {
        Self::with_base_url(transport, CRTSH_BASE_URL)
    }

    pub fn with_base_url(transport: T, base_url: impl Into<String>) -> Self {
        Self { transport, base_url: base_url.into() }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn domains(&self, opts: &SearchOptions, format: SourceFormat) -> Vec<String> {
        match format {
            SourceFormat::Html => self.domains_from_html(opts).await,
            SourceFormat::Json => self.domains_from_json(opts).await,
        }
    }

    /// Scrape the HTML results page. Failures are logged and give no domains.
    pub async fn domains_from_html(&self, opts: &SearchOptions) -> Vec<String> {
        match self.try_html(opts).await {
            Ok(set) => {
                tracing::info!("crt.sh HTML: {} unique names", set.len());
                set.into_sorted()
            }
            Err(e) => {
                tracing::warn!("Error querying crt.sh: {}", e);
                Vec::new()
            }
        }
    }

    /// Query the JSON output; any failure falls back to the HTML page once.
    pub async fn domains_from_json(&self, opts: &SearchOptions) -> Vec<String> {
        match self.try_json(opts).await {
            Ok(set) => {
                tracing::info!("crt.sh JSON: {} unique names", set.len());
                set.into_sorted()
            }
            Err(e) => {
                tracing::warn!("Error querying crt.sh JSON API: {}", e);
                tracing::info!("Falling back to HTML scraping method");
                self.domains_from_html(opts).await
            }
        }
    }

    async fn try_html(&self, opts: &SearchOptions) -> Result<DomainSet> {
        let url = search_url(&self.base_url, opts, SourceFormat::Html);
        tracing::debug!("Querying: {}", url);
        let body = self.transport.get_text(&url, Duration::from_secs(opts.timeout_secs)).await?;
        Ok(parse_html(&body, &opts.domain))
    }

    async fn try_json(&self, opts: &SearchOptions) -> Result<DomainSet> {
        let url = search_url(&self.base_url, opts, SourceFormat::Json);
        tracing::debug!("Querying JSON API: {}", url);
        let body = self.transport.get_text(&url, Duration::from_secs(opts.timeout_secs)).await?;
        parse_json(&body, &opts.domain)
    }
}

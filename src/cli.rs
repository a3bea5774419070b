use clap::builder::TypedValueParser as _;
use clap::Parser;

use crt_scraper::config::{CheckOptions, SearchOptions, DEFAULT_MAX_WORKERS, DEFAULT_TIMEOUT_SECS};

/// Scrape certificate transparency logs from crt.sh and extract unique domains
#[derive(clap::Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Target domain to search for (e.g. example.com)
    #[arg(short = 'd', long)]
    pub domain: String,

    /// Output file path (default: <domain>_subdomains.txt)
    #[arg(short = 'o', long)]
    pub output: Option<String>,

    /// Include wildcard search (%.domain.com)
    #[arg(short = 'w', long, default_value_t = false)]
    pub wildcard: bool,

    /// Exclude expired certificates
    #[arg(short = 'e', long, default_value_t = false)]
    pub exclude_expired: bool,

    /// Use the JSON API instead of HTML scraping (faster)
    #[arg(short = 'j', long, default_value_t = false)]
    pub json: bool,

    /// Request timeout in seconds
    #[arg(short = 't', long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Enable verbose output
    #[arg(short = 'v', long, default_value_t = false)]
    pub verbose: bool,

    /// Enable detailed debug logging
    #[arg(long, default_value_t = false)]
    pub debug: bool,

    /// Check HTTP status of each domain
    #[arg(short = 'c', long, default_value_t = false)]
    pub check: bool,

    /// Maximum number of concurrent workers for status checking
    #[arg(short = 'm', long, default_value_t = DEFAULT_MAX_WORKERS,
          value_parser = clap::value_parser!(u16).range(1..).map(usize::from))]
    pub max_workers: usize,

    /// Disable colored output
    #[arg(long, default_value_t = false)]
    pub no_color: bool,
}

impl Cli {
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            domain: self.domain.clone(),
            include_wildcard: self.wildcard,
            exclude_expired: self.exclude_expired,
            timeout_secs: self.timeout,
        }
    }

    pub fn check_options(&self) -> CheckOptions {
        CheckOptions { max_workers: self.max_workers, timeout_secs: self.timeout }
    }
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}

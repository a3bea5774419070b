use serde::{Deserialize, Serialize};

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_WORKERS: usize = 10;

/// Parameters of a single certificate log query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    pub domain: String,
    pub include_wildcard: bool,
    pub exclude_expired: bool,
    pub timeout_secs: u64,
}

impl SearchOptions {
    pub fn new(domain: impl Into<String>) -> Self {
        Self { domain: domain.into(), ..Self::default() }
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            domain: String::new(),
            include_wildcard: false,
            exclude_expired: false,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Parameters of the reachability sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOptions {
    pub max_workers: usize,
    pub timeout_secs: u64,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self { max_workers: DEFAULT_MAX_WORKERS, timeout_secs: DEFAULT_TIMEOUT_SECS }
    }
}

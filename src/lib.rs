pub mod concurrent;
pub mod config;
pub mod discover;
pub mod error;
pub mod http_client;
pub mod output;
pub mod probe;

// re-export the types most callers need
pub use crate::discover::{CrtSh, DomainSet, SourceFormat};
pub use crate::error::ScraperError;
pub use crate::probe::{ProbeResult, Prober};

pub mod display;
pub mod writer;

pub use display::{format_result, format_results, status_summary, StatusClass};
pub use writer::{default_output_path, write_domains};

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// `<domain>_subdomains.txt` in the working directory.
pub fn default_output_path(domain: &str) -> PathBuf {
    PathBuf::from(format!("{}_subdomains.txt", domain))
}

/// Resolve `path` against the current directory without touching the filesystem.
pub fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(std::env::current_dir()?.join(path))
}

/// Write one domain per line and return the absolute path written.
pub fn write_domains(path: &Path, domains: &[String]) -> Result<PathBuf> {
    let path = absolute(path)?;
    fs::write(&path, domains.join("\n"))?;
    Ok(path)
}

use ahash::AHashSet;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, ScraperError};

static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\n,\s]+").expect("static regex"));

const WILDCARD: &str = "*.";

/// A target is usable only if it has at least one label separator.
pub fn validate_domain(domain: &str) -> Result<()> {
    if domain.is_empty() || !domain.contains('.') {
        return Err(ScraperError::InvalidDomain(domain.to_string()));
    }
    Ok(())
}

/// Deduplicated set of names seen in certificate records.
///
/// Built incrementally, sorted once via [`DomainSet::into_sorted`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainSet {
    inner: AHashSet<String>,
}

impl DomainSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: String) -> bool {
        self.inner.insert(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains(name)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn extend(&mut self, other: DomainSet) {
        self.inner.extend(other.inner);
    }

    pub fn into_sorted(self) -> Vec<String> {
        let mut out: Vec<String> = self.inner.into_iter().collect();
        out.sort();
        out
    }
}

/// Extract every name of `target` found in one raw record.
pub fn extract(raw: &str, target: &str) -> DomainSet {
    let mut set = DomainSet::new();
    extract_into(raw, target, &mut set);
    set
}

/// Streaming form of [`extract`]: adds the record's names to `set`.
///
/// crt.sh sometimes renders two SAN entries with no separator between them
/// (`a.example.comwww.a.example.com`). When the target occurs more than once
/// in a token, the token is cut at each occurrence and every piece is
/// re-suffixed with the target.
pub fn extract_into(raw: &str, target: &str, set: &mut DomainSet) {
    if target.is_empty() {
        return;
    }
    for token in SEPARATORS.split(raw) {
        let token = token.trim();
        let token = token.strip_prefix(WILDCARD).unwrap_or(token);
        if token.is_empty() || !token.contains('.') || !token.contains(target) {
            continue;
        }

        if token.matches(target).count() > 1 {
            let pieces: Vec<&str> = token.split(target).collect();
            for &piece in &pieces[..pieces.len() - 1] {
                // a glued wildcard SAN leaves its marker on the piece
                let piece = piece.strip_prefix(WILDCARD).unwrap_or(piece);
                let candidate = format!("{}{}", piece, target);
                if !candidate.is_empty() && candidate.contains('.') && !candidate.starts_with(WILDCARD) {
                    set.insert(candidate);
                }
            }
        } else {
            set.insert(token.to_string());
        }
    }
}

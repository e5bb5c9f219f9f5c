//! Top-level domain list loading

use crate::error::{BitflipperError, Result};
use std::collections::HashSet;
use std::path::Path;

/// Immutable set of lowercase TLDs, loaded once per run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TldSet {
    tlds: HashSet<String>,
}

impl TldSet {
    /// Parse an IANA style list: one TLD per line, `#` starts a comment line
    pub fn parse(content: &str) -> Self {
        let tlds = content
            .lines()
            .filter(|line| !line.starts_with('#'))
            .map(|line| line.trim().to_lowercase())
            .filter(|line| !line.is_empty())
            .collect();
        Self { tlds }
    }

    /// Load the TLD list from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            BitflipperError::resource_load(path.display().to_string(), e.to_string())
        })?;

        let set = Self::parse(&content);
        if set.is_empty() {
            return Err(BitflipperError::resource_load(
                path.display().to_string(),
                "no TLDs found",
            ));
        }

        tracing::debug!(path = %path.display(), count = set.len(), "Loaded TLD list");
        Ok(set)
    }

    /// Membership test, ignoring case
    pub fn contains(&self, tld: &str) -> bool {
        if tld.bytes().any(|b| b.is_ascii_uppercase()) {
            self.tlds.contains(&tld.to_ascii_lowercase())
        } else {
            self.tlds.contains(tld)
        }
    }

    pub fn len(&self) -> usize {
        self.tlds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tlds.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for TldSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            tlds: iter
                .into_iter()
                .map(|s| s.as_ref().trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

//! Single-bit mutation of domain names

use super::BitString;
use crate::domain::{is_valid_domain, validate_domain, TldSet};
use crate::error::Result;
use std::collections::BTreeSet;

/// Every text reachable from `domain` by inverting one bit, lower-cased.
///
/// Mutations that do not decode are skipped. Nothing else is filtered, so
/// the result can contain `domain` itself, duplicates and invalid names.
pub fn flip_candidates(domain: &str) -> Vec<String> {
    BitString::from_text(domain)
        .single_flips()
        .filter_map(|bits| bits.to_text())
        .map(|text| text.to_lowercase())
        .collect()
}

/// Generate all valid bit-flip domains of `domain`.
///
/// Fails when `domain` itself is not valid under `tlds`. The returned set
/// never contains `domain` and is in ascending order.
pub fn generate(domain: &str, tlds: &TldSet) -> Result<BTreeSet<String>> {
    validate_domain(domain, tlds)?;

    let candidates = flip_candidates(domain);
    let decoded = candidates.len();

    let results: BTreeSet<String> = candidates
        .into_iter()
        .filter(|candidate| candidate != domain)
        .filter(|candidate| is_valid_domain(candidate, tlds))
        .collect();

    tracing::debug!(
        domain = %domain,
        bits = domain.len() * 8,
        decoded,
        valid = results.len(),
        "Generated bit-flip candidates"
    );

    Ok(results)
}

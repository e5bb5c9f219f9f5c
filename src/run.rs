//! One bitflipper run: generate candidates, then look each one up in turn

use crate::bitflip::generate;
use crate::domain::{StatusLookup, TldSet};
use crate::error::Result;
use crate::types::CandidateReport;
use std::time::Instant;

/// Generate the bit-flip candidates of `domain` and report each one.
///
/// With a `lookup`, candidates are checked one after another in ascending
/// order; `emit` sees every report as soon as it is ready. Only an invalid
/// `domain` fails the run.
pub async fn check<F>(
    domain: &str,
    tlds: &TldSet,
    lookup: Option<&dyn StatusLookup>,
    mut emit: F,
) -> Result<Vec<CandidateReport>>
where
    F: FnMut(&CandidateReport),
{
    let start_time = Instant::now();
    let candidates = generate(domain, tlds)?;

    let mut reports = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let status = match lookup {
            Some(lookup) => Some(lookup.lookup(&candidate).await),
            None => None,
        };

        let report = CandidateReport {
            domain: candidate,
            status,
        };
        emit(&report);
        reports.push(report);
    }

    tracing::info!(
        domain = %domain,
        candidates = reports.len(),
        lookup = lookup.map_or("none", |l| l.name()),
        duration_ms = %start_time.elapsed().as_millis(),
        "Bit-flip check completed"
    );

    Ok(reports)
}

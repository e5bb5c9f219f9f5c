//! Terminal rendering of candidates and registration statuses.
//!
//! Colors come from the `console` crate, which drops styling on its own when
//! stdout is not a terminal or `NO_COLOR` is set.

use crate::types::{CandidateReport, RegistrationStatus};
use console::style;

/// Render a status, e.g. `Taken (Reg: Example Inc, exp: 2030-01-01)`
pub fn render_status(status: &RegistrationStatus) -> String {
    match status {
        RegistrationStatus::Available => style("Available").bold().green().to_string(),
        RegistrationStatus::Unknown => style("Unknown").bold().yellow().to_string(),
        RegistrationStatus::Taken {
            registrant,
            expiration,
        } => {
            let taken = style("Taken").bold().red().to_string();
            let expiration = expiration.map(|date| date.format("%Y-%m-%d").to_string());

            let details = match (registrant, expiration) {
                (Some(name), Some(date)) => {
                    format!(" (Reg: {}, exp: {})", style(name).bold(), style(date).bold())
                }
                (Some(name), None) => format!(" (Reg: {})", style(name).bold()),
                (None, Some(date)) => format!(" (Exp: {})", style(date).bold()),
                (None, None) => String::new(),
            };

            taken + &details
        }
    }
}

/// Render one output line: the bare domain, or `domain: status` after a lookup
pub fn render_report(report: &CandidateReport) -> String {
    match &report.status {
        None => report.domain.clone(),
        Some(status) => format!(
            "{}: {}",
            style(&report.domain).bold().cyan(),
            render_status(status)
        ),
    }
}

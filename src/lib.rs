//! Bitflipper - bit-flip domain generation and registration status checking
//!
//! Generates every domain reachable by inverting a single bit of a domain
//! name's bytes, keeps the ones that are valid and registrable, and can look
//! up their registration status through Domainr and WHOIS.

pub mod bitflip;
pub mod config;
pub mod display;
pub mod domain;
pub mod error;
pub mod run;
pub mod types;
#[cfg(feature = "whois")]
pub mod whois;

// Re-export commonly used types
pub use error::{BitflipperError, Result};
pub use types::{ApiKey, CandidateReport, LookupConfig, RegistrationStatus};

// Re-export main functionality
pub use bitflip::{generate, BitString};
pub use config::Config;
pub use domain::{is_valid_domain, DomainrChecker, StatusLookup, TldSet};
pub use run::check;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
pub fn init() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();
    Ok(())
}

//! Domain validation and registration status lookup

pub mod checker;
pub mod tlds;
pub mod validator;

// Re-export main functionality
pub use checker::DomainrChecker;
pub use tlds::TldSet;
pub use validator::{is_valid_domain, validate_domain};

use crate::types::RegistrationStatus;
use async_trait::async_trait;

/// Source of registration status for a single domain.
///
/// Implementations never fail: anything that goes wrong is reported as
/// [`RegistrationStatus::Unknown`].
#[async_trait]
pub trait StatusLookup: Send + Sync {
    /// Look up the registration status of a domain
    async fn lookup(&self, domain: &str) -> RegistrationStatus;

    /// Name of the service, for logs
    fn name(&self) -> &'static str;
}

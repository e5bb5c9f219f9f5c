//! Core types and structures for bitflipper

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Registration status of a candidate domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "status")]
pub enum RegistrationStatus {
    Available,
    Taken {
        registrant: Option<String>,
        expiration: Option<NaiveDate>,
    },
    Unknown,
}

impl RegistrationStatus {
    /// A taken status with no registration details
    pub fn taken() -> Self {
        Self::Taken {
            registrant: None,
            expiration: None,
        }
    }

    pub fn is_taken(&self) -> bool {
        matches!(self, Self::Taken { .. })
    }
}

impl std::fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistrationStatus::Available => write!(f, "available"),
            RegistrationStatus::Taken { .. } => write!(f, "taken"),
            RegistrationStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// A generated candidate together with its looked-up status, if any
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateReport {
    pub domain: String,
    pub status: Option<RegistrationStatus>,
}

/// Domainr API key read from the credential file or environment
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a key, rejecting blank values
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into().trim().to_string();
        if key.is_empty() {
            None
        } else {
            Some(Self(key))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Keys stay out of logs.
impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ApiKey(****)")
    }
}

/// Configuration for registration status lookups
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupConfig {
    pub domainr_url: String,
    pub timeout: Duration,
    pub enable_whois: bool,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            domainr_url: DEFAULT_DOMAINR_URL.to_string(),
            timeout: Duration::from_secs(10),
            enable_whois: true,
        }
    }
}

/// Domainr status endpoint
pub const DEFAULT_DOMAINR_URL: &str = "https://domainr.p.rapidapi.com/v2/status";

//! Error handling for bitflipper

use thiserror::Error;

/// Main error type for bitflipper
#[derive(Error, Debug, Clone)]
pub enum BitflipperError {
    #[error("Invalid domain '{domain}': {message}")]
    InvalidDomain { domain: String, message: String },

    #[error("Unable to load {path}: {message}")]
    ResourceLoad { path: String, message: String },

    #[error("Network error: {message}")]
    Network {
        message: String,
        status_code: Option<u16>,
        url: Option<String>,
    },

    #[error("Timeout error: {operation} timed out after {timeout_secs}s")]
    Timeout {
        operation: String,
        timeout_secs: u64,
    },

    #[error("Parse error: {message}")]
    Parse {
        message: String,
        content: Option<String>,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl BitflipperError {
    pub fn invalid_domain(domain: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidDomain {
            domain: domain.into(),
            message: message.into(),
        }
    }

    pub fn resource_load(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ResourceLoad {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn network(
        message: impl Into<String>,
        status_code: Option<u16>,
        url: Option<String>,
    ) -> Self {
        Self::Network {
            message: message.into(),
            status_code,
            url,
        }
    }

    pub fn timeout(operation: impl Into<String>, timeout_secs: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout_secs,
        }
    }

    pub fn parse(message: impl Into<String>, content: Option<String>) -> Self {
        Self::Parse {
            message: message.into(),
            content,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the message shown to the user on the terminal
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidDomain { .. } => {
                "Please specify a valid domain to test!\nTry: bitflipper example.com".to_string()
            }
            Self::ResourceLoad { .. } => "Unable to load valid TLDs".to_string(),
            Self::Network { message, status_code, .. } => {
                let status = status_code.map_or(String::new(), |c| format!(" ({})", c));
                format!("Network error{}: {}", status, message)
            }
            Self::Timeout { operation, timeout_secs } => {
                format!("Operation '{}' timed out after {}s", operation, timeout_secs)
            }
            Self::Parse { message, .. } => format!("Parse error: {}", message),
            Self::Internal { message } => {
                format!("Internal error: {}\nThis is a bug, please report it", message)
            }
        }
    }
}

/// HTTP failures from the Domainr client
impl From<reqwest::Error> for BitflipperError {
    fn from(err: reqwest::Error) -> Self {
        let status_code = err.status().map(|s| s.as_u16());
        let url = err.url().map(|u| u.to_string());

        let message = if err.is_timeout() {
            "Request timed out".to_string()
        } else if err.is_connect() {
            "Connection failed".to_string()
        } else if err.is_decode() {
            "Could not read response body".to_string()
        } else {
            err.to_string()
        };

        Self::network(message, status_code, url)
    }
}

impl From<serde_json::Error> for BitflipperError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(err.to_string(), None)
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, BitflipperError>;

/// Build an `InvalidDomain` error with a formatted reason
#[macro_export]
macro_rules! validation_error {
    ($domain:expr, $msg:expr) => {
        $crate::error::BitflipperError::invalid_domain($domain, $msg)
    };
    ($domain:expr, $fmt:expr, $($arg:tt)*) => {
        $crate::error::BitflipperError::invalid_domain($domain, format!($fmt, $($arg)*))
    };
}

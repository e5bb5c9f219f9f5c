//! Run configuration.
//!
//! Everything is resolved once at startup and passed down explicitly:
//!
//! - TLD list: `BITFLIPPER_TLDS`, else `tlds.txt` beside the executable,
//!   else `tlds.txt` in the working directory.
//! - Domainr key: `DOMAINR_API_KEY`, else the `DOMAINR-API=<key>` line of
//!   `BITFLIPPER_CONFIG` or `~/.bitflipper`.
//! - Lookup tuning: `DOMAINR_URL`, `BITFLIPPER_TIMEOUT_SECS`, `BITFLIPPER_NO_WHOIS`.

use crate::types::{ApiKey, LookupConfig};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Name of the bundled TLD list
pub const TLD_FILE_NAME: &str = "tlds.txt";

/// Name of the credential file in the home directory
pub const CREDENTIAL_FILE_NAME: &str = ".bitflipper";

/// Prefix of the credential line
pub const CREDENTIAL_PREFIX: &str = "DOMAINR-API";

/// Resolved configuration for one run
#[derive(Debug, Clone)]
pub struct Config {
    pub tld_path: PathBuf,
    pub api_key: Option<ApiKey>,
    pub lookup: LookupConfig,
}

impl Config {
    /// Resolve configuration from the environment and the credential file
    pub fn from_env() -> Self {
        let api_key = env::var("DOMAINR_API_KEY")
            .ok()
            .and_then(ApiKey::new)
            .or_else(|| credential_path().and_then(|path| read_api_key(&path)));

        let mut lookup = LookupConfig::default();
        if let Ok(url) = env::var("DOMAINR_URL") {
            if !url.trim().is_empty() {
                lookup.domainr_url = url.trim().to_string();
            }
        }
        if let Some(secs) = env::var("BITFLIPPER_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
        {
            lookup.timeout = Duration::from_secs(secs);
        }
        if env::var_os("BITFLIPPER_NO_WHOIS").is_some() {
            lookup.enable_whois = false;
        }

        let config = Self {
            tld_path: tld_path(),
            api_key,
            lookup,
        };

        tracing::debug!(
            tld_path = %config.tld_path.display(),
            status_lookup = config.status_lookup_enabled(),
            "Configuration resolved"
        );

        config
    }

    /// Whether candidates get a registration status
    pub fn status_lookup_enabled(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Location of the TLD list
fn tld_path() -> PathBuf {
    if let Some(path) = env::var_os("BITFLIPPER_TLDS") {
        return PathBuf::from(path);
    }

    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(TLD_FILE_NAME)))
        .filter(|path| path.exists())
        .unwrap_or_else(|| PathBuf::from(TLD_FILE_NAME))
}

/// Location of the credential file, if one can be named
fn credential_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os("BITFLIPPER_CONFIG") {
        return Some(PathBuf::from(path));
    }
    env::var_os("HOME").map(|home| Path::new(&home).join(CREDENTIAL_FILE_NAME))
}

/// Read the Domainr key from a credential file.
///
/// Missing or unreadable files and files without a usable key line give `None`.
pub fn read_api_key(path: &Path) -> Option<ApiKey> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_api_key(&content),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "No credential file");
            None
        }
    }
}

/// Find the first `DOMAINR-API` line and take the text after its last `=`
pub fn parse_api_key(content: &str) -> Option<ApiKey> {
    let line = content
        .lines()
        .find(|line| line.starts_with(CREDENTIAL_PREFIX))?;
    let (_, key) = line.rsplit_once('=')?;
    ApiKey::new(key)
}

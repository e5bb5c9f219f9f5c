//! Domain name validation

use crate::domain::TldSet;
use crate::error::{BitflipperError, Result};
use crate::validation_error;
use regex::Regex;
use std::sync::OnceLock;

/// Check whether `text` is a registrable domain under `tlds`
pub fn is_valid_domain(text: &str, tlds: &TldSet) -> bool {
    validate_domain(text, tlds).is_ok()
}

/// Validate a domain, reporting the first rule it breaks.
///
/// The final character check only admits `[a-z0-9.]`, which also rejects
/// hyphens that the structural rules above would have allowed.
pub fn validate_domain(text: &str, tlds: &TldSet) -> Result<()> {
    if let Some(pos) = text.find(char::is_whitespace) {
        return Err(validation_error!(text, "whitespace at position {}", pos));
    }

    let Some(last_dot) = text.rfind('.') else {
        return Err(validation_error!(text, "no dot"));
    };

    if text.starts_with('-') || text.ends_with('-') {
        return Err(validation_error!(text, "starts or ends with a hyphen"));
    }

    let bytes = text.as_bytes();
    for (dot, _) in text.match_indices('.') {
        let before = dot.checked_sub(1).and_then(|i| bytes.get(i));
        let after = bytes.get(dot + 1);
        if before == Some(&b'-') || after == Some(&b'-') {
            return Err(validation_error!(text, "hyphen next to dot at position {}", dot));
        }
    }

    let suffix = &text[last_dot + 1..];
    if !tlds.contains(suffix) {
        return Err(validation_error!(text, "unknown TLD '{}'", suffix));
    }

    if last_dot > 0 && bytes[last_dot - 1] == b'-' {
        return Err(validation_error!(text, "hyphen before the final dot"));
    }

    if let Some(m) = invalid_chars()?.find(text) {
        return Err(validation_error!(text, "invalid character '{}'", m.as_str()));
    }

    Ok(())
}

fn invalid_chars() -> Result<&'static Regex> {
    static INVALID_CHARS: OnceLock<std::result::Result<Regex, regex::Error>> = OnceLock::new();
    INVALID_CHARS
        .get_or_init(|| Regex::new(r"[^a-z0-9.]"))
        .as_ref()
        .map_err(|e| BitflipperError::internal(e.to_string()))
}

//! Plain WHOIS over TCP/43

use crate::error::{BitflipperError, Result};
use crate::whois::registry::{
    parse_iana_referral, parse_registrar_referral, whois_server_for_tld, IANA_WHOIS_SERVER,
};
use chrono::{DateTime, NaiveDate};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

const REGISTRANT_FIELDS: &[&str] = &[
    "registrant name",
    "registrant organization",
    "registrant",
];

const EXPIRATION_FIELDS: &[&str] = &[
    "registry expiry date",
    "registrar registration expiration date",
    "expiration date",
    "expiry date",
    "expires",
    "paid-till",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%b-%Y", "%d.%m.%Y", "%Y.%m.%d", "%Y/%m/%d"];

/// Registration details pulled from a WHOIS response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WhoisRecord {
    pub registrant: Option<String>,
    pub expiration: Option<NaiveDate>,
}

impl WhoisRecord {
    /// Prefer this record's fields, falling back to `other` where absent
    pub fn or(self, other: WhoisRecord) -> WhoisRecord {
        WhoisRecord {
            registrant: self.registrant.or(other.registrant),
            expiration: self.expiration.or(other.expiration),
        }
    }
}

/// WHOIS client with a per-operation timeout
#[derive(Debug, Clone)]
pub struct WhoisClient {
    timeout: Duration,
}

impl WhoisClient {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Look up registrant and expiration of a domain
    pub async fn lookup(&self, domain: &str) -> Result<WhoisRecord> {
        let tld = domain
            .rsplit('.')
            .next()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| BitflipperError::parse("no TLD found", Some(domain.to_string())))?
            .to_lowercase();

        let server = match whois_server_for_tld(&tld) {
            Some(server) => server.to_string(),
            None => {
                let iana = self.query(IANA_WHOIS_SERVER, &tld).await?;
                parse_iana_referral(&iana).ok_or_else(|| {
                    BitflipperError::parse(format!("no WHOIS server found for TLD: {}", tld), None)
                })?
            }
        };

        let raw = self.query(&server, domain).await?;
        let registry = parse_record(&raw);

        // Thin registries (.com, .net) only carry the registrant at the registrar
        let registrar = match parse_registrar_referral(&raw) {
            Some(host) if !host.eq_ignore_ascii_case(&server) => host,
            _ => return Ok(registry),
        };

        match self.query(&registrar, domain).await {
            Ok(raw) => Ok(parse_record(&raw).or(registry)),
            Err(e) => {
                tracing::debug!(
                    domain = %domain,
                    server = %registrar,
                    error = %e,
                    "Registrar WHOIS failed"
                );
                Ok(registry)
            }
        }
    }

    async fn query(&self, server: &str, query: &str) -> Result<String> {
        let secs = self.timeout.as_secs();
        let addr = format!("{}:43", server);
        let failed = |step: &str, e: std::io::Error| {
            let message = format!("WHOIS {} failed: {}", step, e);
            BitflipperError::network(message, None, Some(addr.clone()))
        };

        let mut stream = timeout(self.timeout, TcpStream::connect(&addr))
            .await
            .map_err(|_| BitflipperError::timeout("WHOIS connect", secs))?
            .map_err(|e| failed("connect", e))?;

        timeout(self.timeout, stream.write_all(format!("{}\r\n", query).as_bytes()))
            .await
            .map_err(|_| BitflipperError::timeout("WHOIS write", secs))?
            .map_err(|e| failed("write", e))?;

        let mut buf = Vec::new();
        timeout(self.timeout, stream.read_to_end(&mut buf))
            .await
            .map_err(|_| BitflipperError::timeout("WHOIS read", secs))?
            .map_err(|e| failed("read", e))?;

        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

/// Extract registrant and expiration from a raw WHOIS response
pub fn parse_record(raw: &str) -> WhoisRecord {
    WhoisRecord {
        registrant: extract_field(raw, REGISTRANT_FIELDS),
        expiration: extract_field(raw, EXPIRATION_FIELDS).and_then(|v| parse_date(&v)),
    }
}

/// First non-empty, non-redacted value among `names`, in priority order
fn extract_field(raw: &str, names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| {
        raw.lines().find_map(|line| {
            let (key, value) = line.trim().split_once(':')?;
            let value = value.trim();
            let usable = key.trim().eq_ignore_ascii_case(name)
                && !value.is_empty()
                && !value.to_uppercase().contains("REDACTED");
            usable.then(|| value.to_string())
        })
    })
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }

    let head = value.split(|c: char| c.is_whitespace() || c == 'T').next()?;
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(head, format).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERISIGN_SAMPLE: &str = "   Domain Name: GOOGLE.COM\r\n   Registry Domain ID: 2138514_DOMAIN_COM-VRSN\r\n   Registrar: MarkMonitor Inc.\r\n   Updated Date: 2019-09-09T15:39:04Z\r\n   Creation Date: 1997-09-15T04:00:00Z\r\n   Registry Expiry Date: 2028-09-14T04:00:00Z\r\n";

    #[test]
    fn test_parse_registry_expiry() {
        let record = parse_record(VERISIGN_SAMPLE);
        assert_eq!(record.expiration, NaiveDate::from_ymd_opt(2028, 9, 14));
        assert_eq!(record.registrant, None);
    }

    #[test]
    fn test_parse_registrant_priority() {
        let raw = "Registrant Organization: Example Org\nRegistrant Name: Jane Doe\nExpiration Date: 14-Sep-2030\n";
        let record = parse_record(raw);
        assert_eq!(record.registrant.as_deref(), Some("Jane Doe"));
        assert_eq!(record.expiration, NaiveDate::from_ymd_opt(2030, 9, 14));
    }

    #[test]
    fn test_redacted_values_are_absent() {
        let raw = "Registrant Name: REDACTED FOR PRIVACY\nRegistrant Organization: Acme Corp\n";
        assert_eq!(parse_record(raw).registrant.as_deref(), Some("Acme Corp"));

        let raw = "Registrant Name: Redacted for privacy\n";
        assert_eq!(parse_record(raw), WhoisRecord::default());
    }

    #[test]
    fn test_date_formats() {
        assert_eq!(parse_date("2025-01-31"), NaiveDate::from_ymd_opt(2025, 1, 31));
        assert_eq!(parse_date("2025-01-31 00:00:00 UTC"), NaiveDate::from_ymd_opt(2025, 1, 31));
        assert_eq!(parse_date("31.01.2025"), NaiveDate::from_ymd_opt(2025, 1, 31));
        assert_eq!(parse_date("2025.01.31"), NaiveDate::from_ymd_opt(2025, 1, 31));
        assert_eq!(parse_date("2025-01-31T12:00:00+02:00"), NaiveDate::from_ymd_opt(2025, 1, 31));
        assert_eq!(parse_date("soon"), None);
    }

    #[test]
    fn test_registrar_record_keeps_registry_expiry() {
        let registry = parse_record(VERISIGN_SAMPLE);
        let registrar = parse_record("Registrant Organization: Google LLC\nRegistrar: MarkMonitor\n");

        let merged = registrar.or(registry);
        assert_eq!(merged.registrant.as_deref(), Some("Google LLC"));
        assert_eq!(merged.expiration, NaiveDate::from_ymd_opt(2028, 9, 14));
    }

    #[test]
    fn test_registrar_expiry_wins_when_present() {
        let registry = parse_record(VERISIGN_SAMPLE);
        let registrar =
            parse_record("Registrar Registration Expiration Date: 2028-09-13T07:00:00Z\n");
        assert_eq!(registrar.or(registry).expiration, NaiveDate::from_ymd_opt(2028, 9, 13));
    }

    #[test]
    fn test_ru_style_paid_till() {
        let raw = "domain: EXAMPLE.RU\norg: Example LLC\npaid-till: 2026-03-01T21:00:00Z\n";
        assert_eq!(parse_record(raw).expiration, NaiveDate::from_ymd_opt(2026, 3, 1));
    }
}

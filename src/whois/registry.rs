//! Central WHOIS server registry.
//!
//! A small static mapping for high-usage TLDs. Anything else is discovered
//! through IANA.

/// Server used to discover the authoritative WHOIS server of a TLD
pub const IANA_WHOIS_SERVER: &str = "whois.iana.org";

/// Get the WHOIS server for a TLD (lowercase, without leading dot).
pub fn whois_server_for_tld(tld: &str) -> Option<&'static str> {
    match tld {
        "com" | "net" => Some("whois.verisign-grs.com"),
        "org" => Some("whois.pir.org"),
        "io" => Some("whois.nic.io"),
        "ai" => Some("whois.nic.ai"),
        "co" => Some("whois.nic.co"),
        "me" => Some("whois.nic.me"),
        "xyz" => Some("whois.nic.xyz"),
        "info" => Some("whois.nic.info"),
        "app" | "dev" => Some("whois.nic.google"),
        "de" => Some("whois.denic.de"),
        "uk" => Some("whois.nic.uk"),
        _ => None,
    }
}

/// Pull the referred WHOIS server out of an IANA response
pub fn parse_iana_referral(iana: &str) -> Option<String> {
    let field = |name: &str| {
        iana.lines().map(str::trim).find_map(|line| {
            let (key, value) = line.split_once(':')?;
            let value = value.trim();
            (key.trim().eq_ignore_ascii_case(name) && !value.is_empty()).then(|| value.to_string())
        })
    };

    field("whois").or_else(|| field("refer"))
}

/// Registrar WHOIS server named in a thin registry response, as a bare host
pub fn parse_registrar_referral(raw: &str) -> Option<String> {
    raw.lines().find_map(|line| {
        let (key, value) = line.trim().split_once(':')?;
        if !key.trim().eq_ignore_ascii_case("registrar whois server") {
            return None;
        }
        let value = value.trim();
        let host = value
            .strip_prefix("https://")
            .or_else(|| value.strip_prefix("http://"))
            .unwrap_or(value)
            .trim_end_matches('/');
        (!host.is_empty()).then(|| host.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_servers() {
        assert_eq!(whois_server_for_tld("com"), Some("whois.verisign-grs.com"));
        assert!(whois_server_for_tld("io").is_some());
        assert!(whois_server_for_tld("unknown").is_none());
    }

    #[test]
    fn test_iana_whois_parsing() {
        let sample = r#"
domain:       COM
organisation: Verisign Global Registry Services
whois:        whois.verisign-grs.com
status:       ACTIVE
"#;
        assert_eq!(parse_iana_referral(sample).as_deref(), Some("whois.verisign-grs.com"));
    }

    #[test]
    fn test_iana_refer_parsing() {
        let sample = "refer: whois.nic.io\n";
        assert_eq!(parse_iana_referral(sample).as_deref(), Some("whois.nic.io"));
    }

    #[test]
    fn test_iana_without_server() {
        assert_eq!(parse_iana_referral("domain: ZZ\nwhois:\n"), None);
    }

    const VERISIGN_SAMPLE: &str = "   Domain Name: GOOGLE.COM\r\n   Registrar WHOIS Server: whois.markmonitor.com\r\n   Registrar: MarkMonitor Inc.\r\n   Registry Expiry Date: 2028-09-14T04:00:00Z\r\n";

    #[test]
    fn test_parse_registrar_referral() {
        assert_eq!(
            parse_registrar_referral(VERISIGN_SAMPLE).as_deref(),
            Some("whois.markmonitor.com")
        );
    }

    #[test]
    fn test_registrar_referral_strips_scheme() {
        let raw = "Registrar WHOIS Server: http://whois.example-registrar.com/\n";
        assert_eq!(parse_registrar_referral(raw).as_deref(), Some("whois.example-registrar.com"));
        assert_eq!(parse_registrar_referral("Registrar WHOIS Server: \n"), None);
        assert_eq!(parse_registrar_referral("Registrar: MarkMonitor Inc.\n"), None);
    }
}

//! Registration status lookup through the Domainr API

use crate::domain::StatusLookup;
use crate::error::{BitflipperError, Result};
use crate::types::{ApiKey, LookupConfig, RegistrationStatus};
#[cfg(feature = "whois")]
use crate::whois::WhoisClient;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Instant;
use tokio::time::timeout;

/// Domainr status checker, optionally enriching taken domains through WHOIS
pub struct DomainrChecker {
    client: Client,
    api_key: ApiKey,
    config: LookupConfig,
    #[cfg(feature = "whois")]
    whois_client: Option<WhoisClient>,
}

impl DomainrChecker {
    /// Create a new checker with custom configuration
    pub fn with_config(api_key: ApiKey, config: LookupConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("bitflipper/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to create HTTP client: {}. Using default.", e);
                Client::new()
            });

        #[cfg(feature = "whois")]
        let whois_client = if config.enable_whois {
            Some(WhoisClient::new(config.timeout))
        } else {
            None
        };

        Self {
            client,
            api_key,
            config,
            #[cfg(feature = "whois")]
            whois_client,
        }
    }

    /// Query Domainr for the raw status string of a domain
    async fn query_status(&self, domain: &str) -> Result<Option<String>> {
        let url = &self.config.domainr_url;
        let secs = self.config.timeout.as_secs();

        let request = self
            .client
            .get(url)
            .query(&[("domain", domain), ("mashape-key", self.api_key.as_str())])
            .header("X-RapidAPI-Key", self.api_key.as_str());

        let response = timeout(self.config.timeout, request.send())
            .await
            .map_err(|_| BitflipperError::timeout("Domainr request", secs))??;

        let status = response.status();
        if !status.is_success() {
            return Err(BitflipperError::network(
                format!("Domainr request failed with status {}", status),
                Some(status.as_u16()),
                Some(url.clone()),
            ));
        }

        let text = response.text().await?;
        let parsed: DomainrResponse = serde_json::from_str(&text)?;

        Ok(parsed.into_first_status())
    }

    /// Fill in registrant and expiration for a taken domain
    async fn enrich(&self, domain: &str, status: RegistrationStatus) -> RegistrationStatus {
        #[cfg(feature = "whois")]
        if let Some(whois) = self.whois_client.as_ref().filter(|_| status.is_taken()) {
            return match whois.lookup(domain).await {
                Ok(record) => RegistrationStatus::Taken {
                    registrant: record.registrant,
                    expiration: record.expiration,
                },
                Err(e) => {
                    tracing::debug!(domain = %domain, error = %e, "WHOIS lookup failed");
                    status
                }
            };
        }

        #[cfg(not(feature = "whois"))]
        let _ = domain;

        status
    }
}

#[async_trait]
impl StatusLookup for DomainrChecker {
    async fn lookup(&self, domain: &str) -> RegistrationStatus {
        let start_time = Instant::now();

        let status = match self.query_status(domain).await {
            Ok(Some(raw)) => classify_status(&raw),
            Ok(None) => {
                tracing::debug!(domain = %domain, "Domainr response had no status field");
                RegistrationStatus::Unknown
            }
            Err(e) => {
                tracing::warn!(domain = %domain, error = %e, "Status lookup failed");
                RegistrationStatus::Unknown
            }
        };

        let status = self.enrich(domain, status).await;

        tracing::debug!(
            domain = %domain,
            status = %status,
            duration_ms = %start_time.elapsed().as_millis(),
            "Status lookup completed"
        );

        status
    }

    fn name(&self) -> &'static str {
        "domainr"
    }
}

/// Classify a Domainr status string.
///
/// The string holds space separated tokens such as `"undelegated inactive"`
/// or `"active registrar"`. `inactive` wins over `active`.
pub fn classify_status(raw: &str) -> RegistrationStatus {
    let tokens: Vec<String> = raw.split_whitespace().map(str::to_lowercase).collect();

    if tokens.iter().any(|t| t == "inactive") {
        RegistrationStatus::Available
    } else if tokens.iter().any(|t| t == "active") {
        RegistrationStatus::taken()
    } else {
        RegistrationStatus::Unknown
    }
}

/// Domainr response structures
#[derive(Debug, Deserialize)]
struct DomainrResponse {
    #[serde(default)]
    status: Vec<DomainrStatus>,
}

#[derive(Debug, Deserialize)]
struct DomainrStatus {
    #[serde(default)]
    status: Option<String>,
}

impl DomainrResponse {
    fn into_first_status(self) -> Option<String> {
        self.status.into_iter().next().and_then(|s| s.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    #[test]
    fn test_classify_status() {
        assert_eq!(classify_status("undelegated inactive"), RegistrationStatus::Available);
        assert_eq!(classify_status("inactive"), RegistrationStatus::Available);
        assert_eq!(classify_status("active"), RegistrationStatus::taken());
        assert_eq!(classify_status("registrar active"), RegistrationStatus::taken());
        assert_eq!(classify_status("marketed priced"), RegistrationStatus::Unknown);
        assert_eq!(classify_status(""), RegistrationStatus::Unknown);
    }

    #[test]
    fn test_parse_domainr_response() {
        let body = r#"{"status":[{"domain":"exbmple.com","zone":"com","status":"undelegated inactive","summary":"inactive"}]}"#;
        let parsed: DomainrResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.into_first_status().as_deref(), Some("undelegated inactive"));
    }

    #[test]
    fn test_parse_missing_status_field() {
        let parsed: DomainrResponse = serde_json::from_str(r#"{"errors":[{"code":401}]}"#).unwrap();
        assert_eq!(parsed.into_first_status(), None);

        let parsed: DomainrResponse = serde_json::from_str(r#"{"status":[{"domain":"a.com"}]}"#).unwrap();
        assert_eq!(parsed.into_first_status(), None);
    }

    #[tokio::test]
    async fn test_unreachable_service_degrades_to_unknown() {
        let config = LookupConfig {
            domainr_url: "http://127.0.0.1:9/v2/status".to_string(),
            timeout: Duration::from_secs(2),
            enable_whois: false,
        };
        let checker = DomainrChecker::with_config(ApiKey::new("test-key").unwrap(), config);
        assert_eq!(checker.lookup("exbmple.com").await, RegistrationStatus::Unknown);
        assert_eq!(checker.name(), "domainr");
    }

    /// Serve one HTTP response on a local port; the handle yields the raw request
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/v2/status", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&request).into_owned()
        });

        (url, handle)
    }

    fn local_checker(url: String, enable_whois: bool) -> DomainrChecker {
        let config = LookupConfig {
            domainr_url: url,
            timeout: Duration::from_secs(5),
            enable_whois,
        };
        DomainrChecker::with_config(ApiKey::new("test-key").unwrap(), config)
    }

    async fn status_from(status_line: &'static str, body: &'static str) -> RegistrationStatus {
        let (url, server) = serve_once(status_line, body).await;
        let status = local_checker(url, false).lookup("exbmple.com").await;
        server.await.unwrap();
        status
    }

    #[tokio::test]
    async fn test_active_response_is_taken() {
        let (url, server) = serve_once("200 OK", r#"{"status":[{"domain":"exbmple.com","status":"active registrar"}]}"#).await;
        let status = local_checker(url, false).lookup("exbmple.com").await;
        assert_eq!(status, RegistrationStatus::taken());

        let request = server.await.unwrap().to_lowercase();
        assert!(request.starts_with("get /v2/status?"));
        assert!(request.contains("domain=exbmple.com"));
        assert!(request.contains("mashape-key=test-key"));
        assert!(request.contains("x-rapidapi-key: test-key"));
    }

    #[tokio::test]
    async fn test_inactive_response_is_available_without_whois() {
        // WHOIS is enabled but only consulted for taken domains
        let (url, server) = serve_once("200 OK", r#"{"status":[{"status":"undelegated inactive"}]}"#).await;
        let status = local_checker(url, true).lookup("exbmple.com").await;
        server.await.unwrap();
        assert_eq!(status, RegistrationStatus::Available);
    }

    #[tokio::test]
    async fn test_server_error_is_unknown() {
        let status = status_from("500 Internal Server Error", r#"{"message":"boom"}"#).await;
        assert_eq!(status, RegistrationStatus::Unknown);
    }

    #[tokio::test]
    async fn test_bad_json_is_unknown() {
        assert_eq!(status_from("200 OK", "xyz").await, RegistrationStatus::Unknown);
    }

    #[tokio::test]
    async fn test_empty_status_list_is_unknown() {
        assert_eq!(status_from("200 OK", r#"{"status":[]}"#).await, RegistrationStatus::Unknown);
    }

    #[tokio::test]
    async fn test_missing_status_field_is_unknown() {
        let status = status_from("200 OK", r#"{"status":[{"domain":"exbmple.com","zone":"com"}]}"#).await;
        assert_eq!(status, RegistrationStatus::Unknown);
    }
}

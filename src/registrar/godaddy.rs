//! GoDaddy registrar provider

use crate::error::{DomainScoutError, Result};
use crate::registrar::RegistrarProvider;
use crate::types::{DomainAvailability, RegistrarConfig};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// GoDaddy availability-check client
pub struct GoDaddyRegistrar {
    client: Client,
    api_key: String,
    api_secret: String,
    base_url: String,
}

impl GoDaddyRegistrar {
    pub fn new(config: &RegistrarConfig) -> Result<Self> {
        if config.api_key.is_empty() || config.api_secret.is_empty() {
            return Err(DomainScoutError::config(
                "GoDaddy API key and secret are required",
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| DomainScoutError::network(e.to_string(), None, None))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl RegistrarProvider for GoDaddyRegistrar {
    async fn check(&self, domain: &str) -> Result<DomainAvailability> {
        let url = format!("{}/v1/domains/available", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("domain", domain)])
            .header(
                "Authorization",
                format!("sso-key {}:{}", self.api_key, self.api_secret),
            )
            .send()
            .await
            .map_err(|e| {
                DomainScoutError::network(
                    format!("Failed to reach registrar API: {}", e),
                    None,
                    Some(url.clone()),
                )
            })?;

        let status = response.status();

        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            // Keep the upstream payload so the proxy can forward it verbatim
            let body = serde_json::from_str(&text)
                .unwrap_or(serde_json::Value::String(text.clone()));

            tracing::warn!(
                domain = %domain,
                status = %status,
                "registrar availability check failed"
            );

            return Err(DomainScoutError::registrar(
                domain,
                format!("availability check failed with status {}", status),
                Some(status.as_u16()),
                Some(body),
            ));
        }

        let payload: GoDaddyAvailability = response
            .json()
            .await
            .map_err(|e| DomainScoutError::parse(e.to_string(), None))?;

        tracing::debug!(
            domain = %domain,
            available = payload.available,
            price = ?payload.price,
            "registrar availability check completed"
        );

        // Price stays in the provider's micro-units; conversion is owned
        // by the suggestion client.
        Ok(DomainAvailability {
            domain: payload.domain.unwrap_or_else(|| domain.to_string()),
            available: payload.available,
            price: payload.price,
            currency: payload.currency,
            checked_at: Utc::now(),
        })
    }

    fn name(&self) -> &'static str {
        "godaddy"
    }
}

/// GoDaddy availability response
#[derive(Debug, Deserialize)]
struct GoDaddyAvailability {
    available: bool,
    #[serde(default)]
    domain: Option<String>,
    #[serde(default)]
    price: Option<u64>,
    #[serde(default)]
    currency: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_credentials() {
        let config = RegistrarConfig::default();
        assert!(GoDaddyRegistrar::new(&config).is_err());
    }

    #[test]
    fn test_trims_trailing_slash_from_base_url() {
        let config = RegistrarConfig {
            api_key: "key".to_string(),
            api_secret: "secret".to_string(),
            base_url: "https://api.godaddy.com/".to_string(),
        };

        let registrar = GoDaddyRegistrar::new(&config).unwrap();
        assert_eq!(registrar.base_url, "https://api.godaddy.com");
    }

    #[test]
    fn test_availability_payload_parsing() {
        let json = r#"{"available":true,"domain":"beanly.com","price":11990000,"currency":"USD","definitive":true,"period":1}"#;
        let payload: GoDaddyAvailability = serde_json::from_str(json).unwrap();

        assert!(payload.available);
        assert_eq!(payload.price, Some(11_990_000));
        assert_eq!(payload.currency.as_deref(), Some("USD"));
    }

    #[test]
    fn test_availability_payload_without_price() {
        let json = r#"{"available":false,"domain":"google.com"}"#;
        let payload: GoDaddyAvailability = serde_json::from_str(json).unwrap();

        assert!(!payload.available);
        assert!(payload.price.is_none());
    }
}

//! Core types and structures for domain-scout

use crate::error::{DomainScoutError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Result of one registrar availability lookup.
///
/// `price` is the provider's raw micro-unit price (1,000,000 × the display
/// currency value). The proxy forwards it unmodified; unit conversion is
/// owned by the suggestion client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainAvailability {
    pub domain: String,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    pub checked_at: DateTime<Utc>,
}

/// One suggestion's merged availability state on the client side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainStatus {
    pub domain: String,
    pub available: bool,
    pub price: Option<u64>,
}

impl DomainStatus {
    /// Degraded result for a failed or rate-limited lookup
    pub fn unavailable(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            available: false,
            price: None,
        }
    }
}

/// Outcome of the availability fan-out: one status per requested domain,
/// in request order, plus the last failure message seen (if any).
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub results: Vec<DomainStatus>,
    pub warning: Option<String>,
}

// ── Wire types shared by the proxy service and the suggestion client ──

/// Body of `POST /generateDomainSuggestions`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionRequest {
    pub niche: String,
}

/// Success body of the suggestion endpoint (ordered)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionResponse {
    pub suggestions: Vec<String>,
}

/// Query of `GET /checkDomainAvailability`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    pub domain: String,
}

/// Advisory body for admission-gate rejections and malformed input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisoryBody {
    pub message: String,
}

/// Error body for upstream failures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    pub error: String,
}

// ── Configuration ──

/// Completion provider configuration
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    pub model: String,
    pub api_key: String,
    pub base_url: Option<String>,
    pub temperature: f32,
    pub count: usize,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4.1-mini".to_string(),
            api_key: String::new(),
            base_url: None,
            temperature: 0.2,
            count: 5,
        }
    }
}

impl CompletionConfig {
    /// Load from environment variables (`OPENAI_API_KEY` is required)
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("OPENAI_API_KEY").map_err(|_| {
            DomainScoutError::config("OPENAI_API_KEY environment variable is required")
        })?;

        let defaults = Self::default();
        Ok(Self {
            model: env::var("OPENAI_MODEL").unwrap_or(defaults.model),
            api_key,
            base_url: env::var("OPENAI_BASE_URL").ok(),
            temperature: defaults.temperature,
            count: defaults.count,
        })
    }
}

/// Registrar provider configuration
#[derive(Debug, Clone)]
pub struct RegistrarConfig {
    pub api_key: String,
    pub api_secret: String,
    pub base_url: String,
}

impl Default for RegistrarConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_secret: String::new(),
            base_url: "https://api.godaddy.com".to_string(),
        }
    }
}

impl RegistrarConfig {
    /// Load from environment variables (`GODADDY_API_KEY` and `GODADDY_API_SECRET` are required)
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("GODADDY_API_KEY").map_err(|_| {
            DomainScoutError::config("GODADDY_API_KEY environment variable is required")
        })?;
        let api_secret = env::var("GODADDY_API_SECRET").map_err(|_| {
            DomainScoutError::config("GODADDY_API_SECRET environment variable is required")
        })?;

        Ok(Self {
            api_key,
            api_secret,
            base_url: env::var("GODADDY_BASE_URL")
                .unwrap_or_else(|_| Self::default().base_url),
        })
    }
}

/// Proxy service configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub allowed_origin: String,
    pub rate_limit_cap: u32,
    pub rate_limit_window: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3001,
            allowed_origin: "http://localhost:3000".to_string(),
            rate_limit_cap: crate::gate::DEFAULT_CAP,
            rate_limit_window: crate::gate::DEFAULT_WINDOW,
        }
    }
}

impl ServerConfig {
    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let port = match env::var("PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|_| {
                DomainScoutError::config(format!("PORT is not a valid port number: {}", raw))
            })?,
            Err(_) => defaults.port,
        };

        let rate_limit_cap = match env::var("RATE_LIMIT_MAX") {
            Ok(raw) => raw.parse::<u32>().map_err(|_| {
                DomainScoutError::config(format!("RATE_LIMIT_MAX is not a valid count: {}", raw))
            })?,
            Err(_) => defaults.rate_limit_cap,
        };

        Ok(Self {
            port,
            allowed_origin: env::var("ALLOWED_ORIGIN").unwrap_or(defaults.allowed_origin),
            rate_limit_cap,
            rate_limit_window: defaults.rate_limit_window,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degraded_status() {
        let status = DomainStatus::unavailable("example.com");
        assert_eq!(status.domain, "example.com");
        assert!(!status.available);
        assert!(status.price.is_none());
    }

    #[test]
    fn test_availability_serialization_omits_absent_price() {
        let result = DomainAvailability {
            domain: "example.com".to_string(),
            available: false,
            price: None,
            currency: None,
            checked_at: Utc::now(),
        };

        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("price").is_none());
        assert!(json.get("currency").is_none());
        assert_eq!(json["available"], serde_json::json!(false));
    }

    #[test]
    fn test_server_config_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 3001);
        assert_eq!(config.rate_limit_window, Duration::from_secs(24 * 60 * 60));
    }
}

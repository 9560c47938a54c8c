//! Error handling for domain-scout

use thiserror::Error;

/// Main error type for domain-scout
#[derive(Error, Debug, Clone)]
pub enum DomainScoutError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Completion provider error: {message}")]
    Completion {
        message: String,
        status_code: Option<u16>,
    },

    #[error("Registrar error for '{domain}': {message}")]
    Registrar {
        domain: String,
        message: String,
        status_code: Option<u16>,
        body: Option<serde_json::Value>,
    },

    #[error("Network error: {message}")]
    Network {
        message: String,
        status_code: Option<u16>,
        url: Option<String>,
    },

    #[error("Rate limit exceeded: {message}")]
    RateLimit { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Parse error: {message}")]
    Parse {
        message: String,
        content: Option<String>,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainScoutError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a completion provider error
    pub fn completion(message: impl Into<String>, status_code: Option<u16>) -> Self {
        Self::Completion {
            message: message.into(),
            status_code,
        }
    }

    /// Create a registrar error, keeping the upstream status and payload for forwarding
    pub fn registrar(
        domain: impl Into<String>,
        message: impl Into<String>,
        status_code: Option<u16>,
        body: Option<serde_json::Value>,
    ) -> Self {
        Self::Registrar {
            domain: domain.into(),
            message: message.into(),
            status_code,
            body,
        }
    }

    /// Create a network error
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

    /// Create a rate limit error
    pub fn rate_limit(message: impl Into<String>) -> Self {
        Self::RateLimit {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>, content: Option<String>) -> Self {
        Self::Parse {
            message: message.into(),
            content,
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message } => {
                format!("❌ Configuration problem: {}\n💡 Check your .env file or environment", message)
            }
            Self::Completion { message, .. } => {
                format!("❌ Suggestion provider error: {}\n💡 Check your API key and rate limits", message)
            }
            Self::Registrar { domain, message, .. } => {
                format!("⚠️  Could not check domain '{}': {}", domain, message)
            }
            Self::Network { message, status_code, .. } => {
                let status = status_code.map_or(String::new(), |c| format!(" ({})", c));
                format!("❌ Network error{}: {}\n💡 Check your internet connection", status, message)
            }
            Self::RateLimit { message } => {
                format!("⏱️  {}", message)
            }
            Self::Validation { message } => {
                format!("❌ Validation error: {}\n💡 Check your input format", message)
            }
            Self::Parse { message, .. } => {
                format!("❌ Parse error: {}\n💡 This might be a temporary issue, try again", message)
            }
            Self::Internal { message } => {
                format!("❌ Internal error: {}\n💡 This is a bug, please report it", message)
            }
        }
    }
}

/// Convert from common error types
impl From<reqwest::Error> for DomainScoutError {
    fn from(err: reqwest::Error) -> Self {
        let status_code = err.status().map(|s| s.as_u16());
        let url = err.url().map(|u| u.to_string());

        if err.is_timeout() {
            Self::network("Request timed out", status_code, url)
        } else if err.is_connect() {
            Self::network("Connection failed", status_code, url)
        } else if err.is_request() {
            Self::network("Request failed", status_code, url)
        } else {
            Self::network(err.to_string(), status_code, url)
        }
    }
}

impl From<serde_json::Error> for DomainScoutError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(err.to_string(), None)
    }
}

impl From<std::io::Error> for DomainScoutError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err.to_string())
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, DomainScoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = DomainScoutError::validation("bad domain");
        assert!(error.to_string().contains("bad domain"));

        let error = DomainScoutError::rate_limit("slow down");
        assert!(error.to_string().contains("slow down"));
    }

    #[test]
    fn test_registrar_error_keeps_upstream_payload() {
        let body = serde_json::json!({ "code": "TOO_MANY_REQUESTS" });
        let error =
            DomainScoutError::registrar("example.com", "upstream failed", Some(429), Some(body));

        match error {
            DomainScoutError::Registrar {
                status_code, body, ..
            } => {
                assert_eq!(status_code, Some(429));
                assert!(body.is_some());
            }
            _ => panic!("expected registrar error"),
        }
    }
}

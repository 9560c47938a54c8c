//! Domain name surface-syntax validation
//!
//! Runs before any outbound registrar call; malformed input is rejected
//! here and never forwarded upstream.

use crate::error::{DomainScoutError, Result};
use regex::Regex;

/// Domain name validator
pub struct DomainValidator;

impl DomainValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate a domain name, returning the normalized (trimmed, lowercase) form
    pub fn validate(&self, domain: &str) -> Result<String> {
        let domain = domain.trim().to_lowercase();

        if domain.is_empty() {
            return Err(DomainScoutError::validation("Domain name cannot be empty"));
        }

        if domain.len() > 253 {
            return Err(DomainScoutError::validation(
                "Domain name too long (max 253 characters)",
            ));
        }

        // One or more labels, a dot, one or more labels
        let syntax = Regex::new(r"^[a-z0-9-]+(\.[a-z0-9-]+)+$")
            .map_err(|e| DomainScoutError::internal(e.to_string()))?;

        if !syntax.is_match(&domain) {
            return Err(DomainScoutError::validation(format!(
                "'{}' is not a valid domain name",
                domain
            )));
        }

        for label in domain.split('.') {
            if label.len() > 63 {
                return Err(DomainScoutError::validation(
                    "Domain label too long (max 63 characters)",
                ));
            }
            if label.starts_with('-') || label.ends_with('-') {
                return Err(DomainScoutError::validation(
                    "Domain label cannot start or end with hyphen",
                ));
            }
        }

        Ok(domain)
    }

    /// Check if domain looks like a valid format
    pub fn is_valid_format(&self, domain: &str) -> bool {
        self.validate(domain).is_ok()
    }
}

impl Default for DomainValidator {
    fn default() -> Self {
        Self::new()
    }
}

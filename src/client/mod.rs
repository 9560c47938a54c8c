//! Suggestion client for the proxy service
//!
//! Drives the generate flow end to end: fetch suggestions, fan out one
//! availability lookup per suggestion, join all of them, and format prices
//! for display. Suggestion fetch failure aborts the whole operation;
//! availability failures degrade per item and never fail the batch.

use crate::error::{DomainScoutError, Result};
use crate::types::{
    AdvisoryBody, BatchReport, DomainAvailability, DomainStatus, SuggestionRequest,
    SuggestionResponse,
};
use futures::future::join_all;
use reqwest::{Client, StatusCode};
use std::collections::HashMap;
use std::time::Duration;

/// Micro-units per display currency unit
pub const MICRO_UNITS: u64 = 1_000_000;

/// HTTP client for the proxy service
pub struct SuggestionClient {
    http: Client,
    base_url: String,
}

impl SuggestionClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| DomainScoutError::network(e.to_string(), None, None))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Request suggestions for a niche.
    ///
    /// A 429 from the admission gate surfaces the server's advisory message
    /// as a rate-limit error; any other failure maps to a generic
    /// retry-later error. Either way the caller aborts without running
    /// availability checks.
    pub async fn fetch_suggestions(&self, niche: &str) -> Result<Vec<String>> {
        let url = format!("{}/generateDomainSuggestions", self.base_url);

        let response = self
            .http
            .post(&url)
            .json(&SuggestionRequest {
                niche: niche.to_string(),
            })
            .send()
            .await
            .map_err(|_| {
                DomainScoutError::network(
                    "Error fetching domain name suggestions, please try again later",
                    None,
                    Some(url.clone()),
                )
            })?;

        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let advisory: AdvisoryBody = response.json().await.unwrap_or(AdvisoryBody {
                message: "Too many requests, please try again later".to_string(),
            });
            return Err(DomainScoutError::rate_limit(advisory.message));
        }

        if !status.is_success() {
            return Err(DomainScoutError::network(
                "Error fetching domain name suggestions, please try again later",
                Some(status.as_u16()),
                Some(url),
            ));
        }

        let body: SuggestionResponse = response
            .json()
            .await
            .map_err(|e| DomainScoutError::parse(e.to_string(), None))?;

        Ok(body.suggestions)
    }

    /// Fan out one availability lookup per domain and join them all.
    ///
    /// Every domain always yields a result, in input order. A failed or
    /// rate-limited lookup degrades that one domain to unavailable and
    /// records its message in the shared warning slot (last write wins);
    /// the batch waits for the slowest lookup and never short-circuits.
    pub async fn check_domains(&self, domains: &[String]) -> BatchReport {
        let lookups = domains.iter().map(|domain| self.check_one(domain));
        let settled = join_all(lookups).await;

        let mut results = Vec::with_capacity(domains.len());
        let mut warning = None;

        for (status, failure) in settled {
            if let Some(message) = failure {
                warning = Some(message);
            }
            results.push(status);
        }

        BatchReport { results, warning }
    }

    /// Single availability lookup that never propagates an error
    async fn check_one(&self, domain: &str) -> (DomainStatus, Option<String>) {
        let url = format!("{}/checkDomainAvailability", self.base_url);

        let response = match self
            .http
            .get(&url)
            .query(&[("domain", domain)])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(domain = %domain, error = %e, "availability lookup failed");
                return (
                    DomainStatus::unavailable(domain),
                    Some("Error checking domain availability, please try again later".to_string()),
                );
            }
        };

        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let advisory: AdvisoryBody = response.json().await.unwrap_or(AdvisoryBody {
                message: "Too many requests, please try again later".to_string(),
            });
            return (DomainStatus::unavailable(domain), Some(advisory.message));
        }

        if !status.is_success() {
            tracing::warn!(domain = %domain, status = %status, "availability lookup failed");
            return (
                DomainStatus::unavailable(domain),
                Some("Error checking domain availability, please try again later".to_string()),
            );
        }

        match response.json::<DomainAvailability>().await {
            Ok(result) => (
                DomainStatus {
                    domain: domain.to_string(),
                    available: result.available,
                    price: result.price,
                },
                None,
            ),
            Err(e) => {
                tracing::warn!(domain = %domain, error = %e, "availability response malformed");
                (
                    DomainStatus::unavailable(domain),
                    Some("Error checking domain availability, please try again later".to_string()),
                )
            }
        }
    }
}

/// Format a raw micro-unit price for display: `1_990_000` → `"$1.99 USD"`
pub fn format_price(micro: u64) -> String {
    format!("${:.2} USD", micro as f64 / MICRO_UNITS as f64)
}

/// Build the domain → display-price map from available results with a price
pub fn price_display_map(results: &[DomainStatus]) -> HashMap<String, String> {
    results
        .iter()
        .filter(|r| r.available)
        .filter_map(|r| r.price.map(|p| (r.domain.clone(), format_price(p))))
        .collect()
}

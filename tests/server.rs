//! HTTP-level tests for the proxy service
//!
//! Stub providers stand in for the completion and registrar APIs so the
//! router contract can be proven without network access: suggestion
//! parsing and ordering, input validation before any outbound call,
//! upstream error forwarding, and admission-gate rejection.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Utc;
use http_body_util::BodyExt;
use tower::ServiceExt;

use domain_scout::error::DomainScoutError;
use domain_scout::gate::{AdmissionGate, DEFAULT_WINDOW};
use domain_scout::llm::CompletionProvider;
use domain_scout::registrar::RegistrarProvider;
use domain_scout::server::{build_app, AppState};
use domain_scout::types::DomainAvailability;

// ── Stub providers ─────────────────────────────────────────────

struct StubCompletion {
    text: String,
}

#[async_trait]
impl CompletionProvider for StubCompletion {
    async fn complete(&self, _niche: &str) -> domain_scout::Result<String> {
        Ok(self.text.clone())
    }

    fn name(&self) -> &'static str {
        "stub"
    }

    fn is_ready(&self) -> bool {
        true
    }
}

struct FailingCompletion;

#[async_trait]
impl CompletionProvider for FailingCompletion {
    async fn complete(&self, _niche: &str) -> domain_scout::Result<String> {
        Err(DomainScoutError::completion("upstream unreachable", None))
    }

    fn name(&self) -> &'static str {
        "failing-stub"
    }

    fn is_ready(&self) -> bool {
        true
    }
}

/// Registrar stub that records whether it was ever invoked
struct RecordingRegistrar {
    invoked: Arc<AtomicBool>,
    available: bool,
    price: Option<u64>,
}

#[async_trait]
impl RegistrarProvider for RecordingRegistrar {
    async fn check(&self, domain: &str) -> domain_scout::Result<DomainAvailability> {
        self.invoked.store(true, Ordering::SeqCst);
        Ok(DomainAvailability {
            domain: domain.to_string(),
            available: self.available,
            price: self.price,
            currency: self.price.map(|_| "USD".to_string()),
            checked_at: Utc::now(),
        })
    }

    fn name(&self) -> &'static str {
        "recording-stub"
    }
}

/// Registrar stub that fails with a forwardable upstream status and payload
struct UpstreamErrorRegistrar {
    status: u16,
    body: serde_json::Value,
}

#[async_trait]
impl RegistrarProvider for UpstreamErrorRegistrar {
    async fn check(&self, domain: &str) -> domain_scout::Result<DomainAvailability> {
        Err(DomainScoutError::registrar(
            domain,
            format!("availability check failed with status {}", self.status),
            Some(self.status),
            Some(self.body.clone()),
        ))
    }

    fn name(&self) -> &'static str {
        "upstream-error-stub"
    }
}

// ── Test app builders ──────────────────────────────────────────

const TEST_ORIGIN: &str = "http://localhost:3000";

fn app_with(
    completion: Arc<dyn CompletionProvider>,
    registrar: Arc<dyn RegistrarProvider>,
    cap: u32,
) -> axum::Router {
    let state = AppState::new(
        completion,
        registrar,
        Arc::new(AdmissionGate::new(cap, DEFAULT_WINDOW)),
    );
    build_app(state, TEST_ORIGIN).expect("failed to build test app")
}

fn default_app(cap: u32) -> (axum::Router, Arc<AtomicBool>) {
    let invoked = Arc::new(AtomicBool::new(false));
    let registrar = RecordingRegistrar {
        invoked: invoked.clone(),
        available: true,
        price: Some(11_990_000),
    };
    let completion = StubCompletion {
        text: "1. beanly.com\n2. roastly.io\n3. brewhub.net\n4. cuppa.org\n5. mochaly.net"
            .to_string(),
    };
    (
        app_with(Arc::new(completion), Arc::new(registrar), cap),
        invoked,
    )
}

fn suggestion_request(niche: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/generateDomainSuggestions")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::json!({ "niche": niche }).to_string(),
        ))
        .expect("failed to build request")
}

fn availability_request(domain: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(format!("/checkDomainAvailability?domain={}", domain))
        .body(Body::empty())
        .expect("failed to build request")
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is not valid JSON")
}

// ── Suggestion endpoint ────────────────────────────────────────

#[tokio::test]
async fn suggestions_are_parsed_ordered_and_clean() {
    let (app, _) = default_app(100);

    let response = app.oneshot(suggestion_request("coffee")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let suggestions = body["suggestions"].as_array().unwrap();

    assert_eq!(suggestions.len(), 5);
    assert_eq!(suggestions[0], "beanly.com");
    assert_eq!(suggestions[1], "roastly.io");
    assert_eq!(suggestions[4], "mochaly.net");

    for entry in suggestions {
        let entry = entry.as_str().unwrap();
        assert!(!entry.is_empty());
        assert_eq!(entry.trim(), entry);
        assert!(!entry.chars().next().unwrap().is_ascii_digit());
    }
}

#[tokio::test]
async fn suggestion_provider_failure_yields_500_with_diagnostics() {
    let invoked = Arc::new(AtomicBool::new(false));
    let app = app_with(
        Arc::new(FailingCompletion),
        Arc::new(RecordingRegistrar {
            invoked,
            available: false,
            price: None,
        }),
        100,
    );

    let response = app.oneshot(suggestion_request("coffee")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Error fetching domain name suggestions");
    assert!(body["error"].as_str().unwrap().contains("upstream unreachable"));
}

// ── Availability endpoint ──────────────────────────────────────

#[tokio::test]
async fn availability_returns_raw_micro_unit_price() {
    let (app, invoked) = default_app(100);

    let response = app.oneshot(availability_request("beanly.com")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(invoked.load(Ordering::SeqCst));

    let body = body_json(response).await;
    assert_eq!(body["domain"], "beanly.com");
    assert_eq!(body["available"], true);
    // Price is forwarded unconverted
    assert_eq!(body["price"], 11_990_000);
}

#[tokio::test]
async fn malformed_domain_is_rejected_without_outbound_call() {
    for bad in ["nodot", "spaced%20out.com%20x", "-bad.com"] {
        let (app, invoked) = default_app(100);

        let response = app.oneshot(availability_request(bad)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "domain: {}", bad);
        assert!(
            !invoked.load(Ordering::SeqCst),
            "registrar must not be called for {}",
            bad
        );

        let body = body_json(response).await;
        assert!(body["message"].as_str().unwrap().len() > 0);
    }
}

#[tokio::test]
async fn upstream_registrar_error_is_forwarded() {
    let app = app_with(
        Arc::new(StubCompletion {
            text: String::new(),
        }),
        Arc::new(UpstreamErrorRegistrar {
            status: 422,
            body: serde_json::json!({ "code": "UNSUPPORTED_TLD", "message": "tld not supported" }),
        }),
        100,
    );

    let response = app.oneshot(availability_request("beanly.veryodd")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    assert_eq!(body["code"], "UNSUPPORTED_TLD");
}

// ── Admission gate ─────────────────────────────────────────────

#[tokio::test]
async fn requests_beyond_cap_are_rejected_with_429() {
    let (app, _) = default_app(2);

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(availability_request("beanly.com"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .clone()
        .oneshot(availability_request("beanly.com"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let body = body_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("24 hours"));
}

#[tokio::test]
async fn gate_rejection_never_reaches_the_registrar() {
    let invoked = Arc::new(AtomicBool::new(false));
    let app = app_with(
        Arc::new(StubCompletion {
            text: String::new(),
        }),
        Arc::new(RecordingRegistrar {
            invoked: invoked.clone(),
            available: true,
            price: None,
        }),
        0,
    );

    let response = app.oneshot(availability_request("beanly.com")).await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(!invoked.load(Ordering::SeqCst));
}

#[tokio::test]
async fn gate_counts_client_identities_separately() {
    let (app, _) = default_app(1);

    for ip in ["203.0.113.1", "203.0.113.2", "203.0.113.3"] {
        let request = Request::builder()
            .method("GET")
            .uri("/checkDomainAvailability?domain=beanly.com")
            .header("x-forwarded-for", ip)
            .body(Body::empty())
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "ip: {}", ip);
    }
}

#[tokio::test]
async fn health_probe_is_not_gated() {
    let (app, _) = default_app(0);

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

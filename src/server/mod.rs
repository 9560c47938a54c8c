//! Proxy service exposing the suggestion and availability endpoints
//!
//! The router proxies two upstream providers behind a per-client admission
//! gate and an exact-origin CORS policy. Handlers are stateless; the gate
//! holds the only state that survives across requests.

pub mod routes;

pub use routes::ApiError;

use crate::error::{DomainScoutError, Result};
use crate::gate::AdmissionGate;
use crate::llm::CompletionProvider;
use crate::registrar::{DomainValidator, RegistrarProvider};
use crate::types::ServerConfig;
use axum::http::{header::CONTENT_TYPE, HeaderValue, Method};
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub completion: Arc<dyn CompletionProvider>,
    pub registrar: Arc<dyn RegistrarProvider>,
    pub gate: Arc<AdmissionGate>,
    pub validator: Arc<DomainValidator>,
}

impl AppState {
    pub fn new(
        completion: Arc<dyn CompletionProvider>,
        registrar: Arc<dyn RegistrarProvider>,
        gate: Arc<AdmissionGate>,
    ) -> Self {
        Self {
            completion,
            registrar,
            gate,
            validator: Arc::new(DomainValidator::new()),
        }
    }
}

/// Build the proxy router.
///
/// Only the configured frontend origin is allowed through CORS; the
/// admission gate guards both proxy endpoints but not the health probe.
pub fn build_app(state: AppState, allowed_origin: &str) -> Result<Router> {
    let origin = allowed_origin.parse::<HeaderValue>().map_err(|_| {
        DomainScoutError::config(format!("Invalid allowed origin: {}", allowed_origin))
    })?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    let app = Router::new()
        .route(
            "/generateDomainSuggestions",
            post(routes::generate_domain_suggestions),
        )
        .route(
            "/checkDomainAvailability",
            get(routes::check_domain_availability),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            routes::admission_middleware,
        ))
        .route("/health", get(routes::health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

/// Bind and serve until shutdown
pub async fn run(config: &ServerConfig, state: AppState) -> anyhow::Result<()> {
    use anyhow::Context;

    let app = build_app(state, &config.allowed_origin)?;

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    tracing::info!(
        addr = %addr,
        allowed_origin = %config.allowed_origin,
        rate_limit_cap = config.rate_limit_cap,
        "proxy service listening"
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}

//! Request handlers for the proxy service

use crate::error::DomainScoutError;
use crate::gate::Admission;
use crate::llm::parse_suggestion_lines;
use crate::server::AppState;
use crate::types::{AdvisoryBody, AvailabilityQuery, ErrorBody, SuggestionRequest, SuggestionResponse};
use axum::extract::{ConnectInfo, Query, Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Json, Response};
use std::net::{IpAddr, SocketAddr};

/// Failure surface of the two proxy endpoints
#[derive(Debug)]
pub enum ApiError {
    /// Malformed input rejected before any outbound call
    BadRequest { message: String },
    /// Suggestion generation failed; the whole operation aborts
    Suggestion { source: DomainScoutError },
    /// Availability lookup failed; upstream status and payload are forwarded
    /// when the registrar supplied them
    Availability { source: DomainScoutError },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest { message } => {
                (StatusCode::BAD_REQUEST, Json(AdvisoryBody { message })).into_response()
            }
            ApiError::Suggestion { source } => {
                tracing::error!(error = %source, "error fetching domain name suggestions");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody {
                        message: "Error fetching domain name suggestions".to_string(),
                        error: source.to_string(),
                    }),
                )
                    .into_response()
            }
            ApiError::Availability { source } => {
                tracing::error!(error = %source, "error checking domain availability");
                if let DomainScoutError::Registrar {
                    status_code: Some(code),
                    body: Some(payload),
                    ..
                } = &source
                {
                    if let Ok(status) = StatusCode::from_u16(*code) {
                        return (status, Json(payload.clone())).into_response();
                    }
                }
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody {
                        message: "Error checking domain availability".to_string(),
                        error: source.to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

/// Admission middleware guarding both proxy endpoints.
///
/// Rejections never reach a handler or an upstream provider.
pub async fn admission_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let key = client_key(&request);

    match state.gate.admit(&key) {
        Admission::Granted => next.run(request).await,
        Admission::Denied { message } => {
            tracing::warn!(client = %key, "request rejected by admission gate");
            (StatusCode::TOO_MANY_REQUESTS, Json(AdvisoryBody { message })).into_response()
        }
    }
}

/// Client identity for gate keying.
///
/// Priority: X-Forwarded-For (first entry), X-Real-IP, socket address.
fn client_key(request: &Request) -> String {
    if let Some(forwarded) = request.headers().get("x-forwarded-for") {
        if let Some(ip) = forwarded
            .to_str()
            .ok()
            .and_then(|s| s.split(',').next())
            .and_then(|s| s.trim().parse::<IpAddr>().ok())
        {
            return ip.to_string();
        }
    }

    if let Some(real_ip) = request.headers().get("x-real-ip") {
        if let Some(ip) = real_ip.to_str().ok().and_then(|s| s.parse::<IpAddr>().ok()) {
            return ip.to_string();
        }
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// `POST /generateDomainSuggestions`
pub async fn generate_domain_suggestions(
    State(state): State<AppState>,
    Json(request): Json<SuggestionRequest>,
) -> Result<Json<SuggestionResponse>, ApiError> {
    let raw = state
        .completion
        .complete(&request.niche)
        .await
        .map_err(|source| ApiError::Suggestion { source })?;

    let suggestions =
        parse_suggestion_lines(&raw).map_err(|source| ApiError::Suggestion { source })?;

    tracing::info!(
        niche = %request.niche,
        count = suggestions.len(),
        provider = state.completion.name(),
        "generated domain suggestions"
    );

    Ok(Json(SuggestionResponse { suggestions }))
}

/// `GET /checkDomainAvailability?domain=…`
pub async fn check_domain_availability(
    State(state): State<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Response, ApiError> {
    let domain = state
        .validator
        .validate(&query.domain)
        .map_err(|e| ApiError::BadRequest {
            message: e.to_string(),
        })?;

    let result = state
        .registrar
        .check(&domain)
        .await
        .map_err(|source| ApiError::Availability { source })?;

    Ok(Json(result).into_response())
}

/// `GET /health` liveness probe (not gated)
pub async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request_with_headers(headers: &[(&str, &str)]) -> Request {
        let mut builder = axum::http::Request::builder().uri("/checkDomainAvailability");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_client_key_prefers_forwarded_for() {
        let request = request_with_headers(&[
            ("x-forwarded-for", "203.0.113.9, 10.0.0.1"),
            ("x-real-ip", "198.51.100.1"),
        ]);
        assert_eq!(client_key(&request), "203.0.113.9");
    }

    #[test]
    fn test_client_key_falls_back_to_real_ip() {
        let request = request_with_headers(&[("x-real-ip", "198.51.100.1")]);
        assert_eq!(client_key(&request), "198.51.100.1");
    }

    #[test]
    fn test_client_key_without_identity() {
        let request = request_with_headers(&[]);
        assert_eq!(client_key(&request), "unknown");
    }

    #[test]
    fn test_client_key_ignores_garbage_header() {
        let request = request_with_headers(&[("x-forwarded-for", "not-an-ip")]);
        assert_eq!(client_key(&request), "unknown");
    }
}

//! HTTP transport module for insanity-meter
//!
//! Axum server exposing `POST /compare` and a plain `GET /health`.

use axum::{
    Json, Router,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    response::IntoResponse,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::Instrument;
use uuid::Uuid;

use crate::compare::CompareService;
use crate::error::{CompareError, InsanityMeterError, Result};
use crate::events::{CompareRequest, CompareResponse};

/// Shared state for HTTP server
#[derive(Clone)]
pub struct HttpState {
    pub service: Arc<CompareService>,
}

impl HttpState {
    pub fn new(service: CompareService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Health check endpoint
pub async fn health_handler() -> impl IntoResponse {
    "ok"
}

/// Rate a query and return it with three comparisons.
///
/// The body is decoded as JSON whatever its Content-Type says.
pub async fn compare_handler(
    State(state): State<HttpState>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> std::result::Result<Json<CompareResponse>, CompareError> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("compare", %request_id);

    async move {
        let body = body.map_err(|rejection| CompareError::InvalidRequest {
            message: rejection.body_text(),
        })?;
        let CompareRequest { query } = decode_compare_request(&body)?;

        tracing::info!(query_len = query.len(), "compare request received");
        let events = state.service.compare(&query).await?;
        tracing::info!(count = events.len(), "compare request succeeded");

        Ok::<_, CompareError>(Json(CompareResponse { events }))
    }
    .instrument(span)
    .await
}

fn decode_compare_request(body: &[u8]) -> std::result::Result<CompareRequest, CompareError> {
    serde_json::from_slice(body).map_err(|e| CompareError::InvalidRequest {
        message: e.to_string(),
    })
}

pub fn router(state: HttpState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/compare", post(compare_handler))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_http_server(bind: std::net::SocketAddr, service: CompareService) -> Result<()> {
    let app = router(HttpState::new(service));

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .map_err(|e| InsanityMeterError::Http {
            message: format!("Failed to bind HTTP listener on {}: {}", bind, e),
        })?;

    tracing::info!("Starting HTTP server on {} (POST /compare)", bind);

    axum::serve(listener, app)
        .await
        .map_err(|e| InsanityMeterError::Http {
            message: format!("HTTP server error: {}", e),
        })?;

    Ok(())
}

//! HTTP parameter service
//!
//! `POST /generate` normalizes a form submission and echoes the descriptor
//! back as `{"model_data": ...}`. `GET /health` reports liveness.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use http::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use text3d_engine::params::{GenerateRequest, ModelDescriptor, ParameterService};
use tower_http::cors::{Any, CorsLayer};

/// Build the router around `service`
pub fn app(service: ParameterService) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/generate", post(generate))
        .layer(cors_layer())
        .with_state(Arc::new(service))
}

/// Bind `address` and serve until the process exits
pub async fn serve(address: SocketAddr, service: ParameterService) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(address).await?;
    log::info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app(service)).await
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

/// Successful `/generate` body
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Normalized descriptor
    pub model_data: ModelDescriptor,
}

/// Error body for any non-OK response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable reason
    pub error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn generate(
    State(service): State<Arc<ParameterService>>,
    body: Bytes,
) -> Result<Json<GenerateResponse>, ApiError> {
    let request: GenerateRequest = parse_json(&body)?;
    let model_data = service.normalize(&request).map_err(|err| {
        log::warn!("Rejected generation request: {}", err);
        ApiError::bad_request(err.to_string())
    })?;

    log::debug!("Generated descriptor for '{}'", model_data.text);
    Ok(Json(GenerateResponse { model_data }))
}

fn parse_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    if body.is_empty() {
        return Err(ApiError::bad_request("request body is required"));
    }

    serde_json::from_slice(body)
        .map_err(|err| ApiError::bad_request(format!("invalid JSON body: {err}")))
}

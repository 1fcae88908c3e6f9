//! Alert collector HTTP service
//!
//! Endpoints:
//! - POST /reportar_localizacao - Store one alert payload
//! - GET /reportar_localizacao - List stored alerts, oldest first
//! - GET /health - Health check
//!
//! Alerts live in memory only; the dashboard polls the GET route.

use axum::{
    extract::State,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::types::AlertPayload;
use crate::COLLECTOR_PATH;

/// App state
#[derive(Debug, Default)]
pub struct CollectorState {
    pub alerts: RwLock<Vec<AlertPayload>>,
}

/// Answer to a stored alert
#[derive(Debug, Serialize, Deserialize)]
pub struct ReceiptResponse {
    pub status: String,
    pub mensagem: String,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub alerts_stored: usize,
}

/// Create the collector router with fresh state
pub fn create_router() -> Router {
    create_router_with_state(Arc::new(CollectorState::default()))
}

/// Create the collector router over shared state (lets callers inspect it)
pub fn create_router_with_state(state: Arc<CollectorState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(COLLECTOR_PATH, get(list_alerts).post(receive_alert))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<CollectorState>>) -> Json<HealthResponse> {
    let alerts = state.alerts.read().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        alerts_stored: alerts.len(),
    })
}

/// Store an alert
async fn receive_alert(
    State(state): State<Arc<CollectorState>>,
    Json(alert): Json<AlertPayload>,
) -> Json<ReceiptResponse> {
    info!(
        tipo_alerta = %alert.tipo_alerta,
        cidade = %alert.cidade,
        motivo = %alert.motivo,
        "alert received"
    );
    state.alerts.write().await.push(alert);

    Json(ReceiptResponse {
        status: "sucesso".to_string(),
        mensagem: "Alerta recebido com sucesso".to_string(),
    })
}

/// List stored alerts
async fn list_alerts(State(state): State<Arc<CollectorState>>) -> Json<Vec<AlertPayload>> {
    Json(state.alerts.read().await.clone())
}

/// Run the collector until the process is stopped
pub async fn run_collector(addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let router = create_router();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    println!("SafeMesh collector running on {}", addr);
    println!("  POST {}  - Store alert", COLLECTOR_PATH);
    println!("  GET  {}  - List alerts", COLLECTOR_PATH);
    println!("  GET  /health                - Health check");
    axum::serve(listener, router).await?;
    Ok(())
}

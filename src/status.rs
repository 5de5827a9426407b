use crate::scanner::DealScanner;
use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

pub fn router(scanner: Arc<DealScanner>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/status", get(status))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .with_state(scanner)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "deal-scout",
        "timestamp": Utc::now().to_rfc3339()
    }))
}

async fn status(State(scanner): State<Arc<DealScanner>>) -> Json<serde_json::Value> {
    Json(snapshot(&scanner).await)
}

/// Current scanner state as served by `/api/status`.
pub async fn snapshot(scanner: &DealScanner) -> serde_json::Value {
    serde_json::json!({
        "state": scanner.state().await,
        "reportMode": scanner.report_mode(),
        "watchlistSize": scanner.watchlist().len(),
        "sources": scanner.source_count(),
        "ledgerSize": scanner.deduplicator().len().await,
        "stats": scanner.stats().await,
    })
}

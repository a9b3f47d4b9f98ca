use axum::{extract::State, Json};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::server::state::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    products: usize,
    timestamp: String,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        products: state.catalog.len(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

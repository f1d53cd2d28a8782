// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use super::http_server::AppState;
use crate::version;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    /// Display name of the active engine
    pub service: String,
    /// Configured engine id
    pub ocr_engine: String,
}

impl HealthResponse {
    pub fn healthy(service: String, ocr_engine: &str) -> Self {
        Self {
            status: "healthy".to_string(),
            service,
            ocr_engine: ocr_engine.to_string(),
        }
    }
}

/// Endpoints listed by `/`
pub const ENDPOINTS: &[&str] = &["/ocr/", "/ocr/with-positions/", "/health"];

/// Service descriptor returned by `/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceDescriptor {
    pub message: String,
    pub engine: String,
    pub endpoints: Vec<String>,
    pub version: String,
}

impl ServiceDescriptor {
    pub fn new(display_name: &str, engine: &str) -> Self {
        Self {
            message: format!("OCR API powered by {}", display_name),
            engine: engine.to_string(),
            endpoints: ENDPOINTS.iter().map(|e| e.to_string()).collect(),
            version: version::VERSION_NUMBER.to_string(),
        }
    }
}

/// GET /health
///
/// Always healthy while the process is serving. `ocr_engine` is the
/// configured id, so a fallback still reports `yomitoku`.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(
        state.engine.display_name(),
        state.engine.requested_id(),
    ))
}

/// GET /
pub async fn root_handler(State(state): State<AppState>) -> Json<ServiceDescriptor> {
    Json(ServiceDescriptor::new(
        &state.engine.display_name(),
        state.engine.requested_id(),
    ))
}

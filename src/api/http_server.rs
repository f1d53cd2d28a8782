// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use super::handlers::{health_handler, root_handler};
use super::ocr::{ocr_handler, ocr_with_positions_handler};
use crate::config::DEFAULT_MAX_UPLOAD_BYTES;
use crate::vision::{EngineSelection, StagingArea};

/// Shared state handed to every request
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<EngineSelection>,
    pub staging: Arc<StagingArea>,
}

impl AppState {
    pub fn new(engine: EngineSelection, staging: StagingArea) -> Self {
        Self {
            engine: Arc::new(engine),
            staging: Arc::new(staging),
        }
    }
}

/// Router-level settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterOptions {
    /// Allowed browser origins; `*` allows any origin without credentials
    pub cors_origins: Vec<String>,
    /// Upper bound on request body size
    pub max_upload_bytes: usize,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            cors_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:5173".to_string(),
            ],
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Build the router with default options
pub fn create_app(state: AppState) -> Router {
    create_app_with_options(state, &RouterOptions::default())
}

pub fn create_app_with_options(state: AppState, options: &RouterOptions) -> Router {
    Router::new()
        // Service descriptor
        .route("/", get(root_handler))
        // Health check
        .route("/health", get(health_handler))
        // OCR endpoints, with and without trailing slash
        .route("/ocr/", post(ocr_handler))
        .route("/ocr", post(ocr_handler))
        .route("/ocr/with-positions/", post(ocr_with_positions_handler))
        .route("/ocr/with-positions", post(ocr_with_positions_handler))
        .layer(DefaultBodyLimit::max(options.max_upload_bytes))
        .layer(cors_layer(&options.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS policy for the configured origins
///
/// Credentials are allowed for explicit origins, so methods and headers
/// mirror the preflight request instead of using a wildcard.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|origin| origin.trim() == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .map(|origin| origin.trim())
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Serve until Ctrl+C
pub async fn start_server(
    state: AppState,
    options: &RouterOptions,
    addr: SocketAddr,
) -> anyhow::Result<()> {
    let app = create_app_with_options(state, options);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("OCR API listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("OCR API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

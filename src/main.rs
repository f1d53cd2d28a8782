// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use clap::Parser;
use ocr_gateway::{
    api::{start_server, AppState},
    config::ServerConfig,
    version,
    vision::{select_engine, EngineBackends},
};
use std::env;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let config = ServerConfig::parse();
    let addr = config.listen_addr()?;

    info!("🚀 Starting {}", version::get_version_string());

    // Engine choice is fixed for the lifetime of the process
    let engine = select_engine(
        &config.engines.engine,
        EngineBackends::from_config(&config.engines),
    );

    let staging = config.staging_area();
    info!("📂 Staging uploads in {}", staging.dir().display());

    let state = AppState::new(engine, staging);
    start_server(state, &config.router_options(), addr).await
}

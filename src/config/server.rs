// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP server settings

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use super::engines::EngineConfig;
use crate::api::http_server::RouterOptions;
use crate::vision::StagingArea;

/// Maximum upload size (10MB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// OCR gateway server
#[derive(Parser, Debug, Clone)]
#[command(name = "ocr-gateway")]
#[command(version)]
#[command(about = "HTTP OCR service backed by PaddleOCR or YomiToku", long_about = None)]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "OCR_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    #[command(flatten)]
    pub engines: EngineConfig,

    /// Comma-separated origins allowed by CORS ("*" allows any origin)
    #[arg(
        long = "cors-origins",
        env = "CORS_ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_values = ["http://localhost:3000", "http://localhost:5173"]
    )]
    pub cors_origins: Vec<String>,

    /// Directory for staged uploads (defaults to the system temp directory)
    #[arg(long, env = "OCR_TEMP_DIR")]
    pub temp_dir: Option<PathBuf>,

    /// Largest accepted request body in bytes
    #[arg(long, env = "MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }

    pub fn staging_area(&self) -> StagingArea {
        match &self.temp_dir {
            Some(dir) => StagingArea::new(dir.clone()),
            None => StagingArea::system(),
        }
    }

    pub fn router_options(&self) -> RouterOptions {
        RouterOptions {
            cors_origins: self.cors_origins.clone(),
            max_upload_bytes: self.max_upload_bytes,
        }
    }
}

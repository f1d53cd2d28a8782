// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! PaddleOCR adapter (line-detector style)
//!
//! PaddleOCR reports, per detected line, the four corners of the detected
//! quadrilateral and a `(text, confidence)` pair. The engine call blocks, so
//! the adapter runs it on the blocking thread pool.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::engine::{EngineError, EngineKind, OcrAdapter};
use super::model::{BoundingBox, OcrResult, OcrResultBuilder, Point};
use super::runner::RunnerCommand;
use crate::config::PaddleConfig;

/// One detected line: corner points and `(text, confidence)`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaddleLine(pub [[f64; 2]; 4], pub (String, f64));

/// Native PaddleOCR output: one optional line list per page, or nothing
pub type PaddlePages = Option<Vec<Option<Vec<PaddleLine>>>>;

/// Source of native PaddleOCR results
#[cfg_attr(test, mockall::automock)]
pub trait PaddleBackend: Send + Sync {
    /// Check that the engine can be loaded
    fn probe(&self) -> Result<(), EngineError>;

    /// Run detection and recognition on an image file (blocking)
    fn ocr(&self, image_path: &Path) -> Result<PaddlePages, EngineError>;
}

/// PaddleOCR reached through its runner program
pub struct CommandPaddleBackend {
    command: RunnerCommand,
}

impl CommandPaddleBackend {
    pub fn new(config: &PaddleConfig) -> Self {
        let command = RunnerCommand::new(EngineKind::Paddle, config.command.clone())
            .arg("--lang")
            .arg(config.lang.clone());
        Self { command }
    }

    /// Backend driven by an already assembled runner command
    pub fn from_command(command: RunnerCommand) -> Self {
        Self { command }
    }

    pub fn command(&self) -> &RunnerCommand {
        &self.command
    }
}

impl PaddleBackend for CommandPaddleBackend {
    fn probe(&self) -> Result<(), EngineError> {
        self.command.probe()
    }

    fn ocr(&self, image_path: &Path) -> Result<PaddlePages, EngineError> {
        let stdout = self.command.run_blocking(image_path)?;
        self.command.parse(&stdout)
    }
}

/// Map PaddleOCR lines onto the shared schema
///
/// Only the first page is used. No pages, or an empty first page, is an
/// empty result.
pub fn convert_lines(pages: PaddlePages) -> OcrResult {
    let lines = pages
        .and_then(|pages| pages.into_iter().next())
        .flatten()
        .unwrap_or_default();

    let mut builder = OcrResultBuilder::with_capacity(lines.len());
    for PaddleLine(corners, (text, confidence)) in lines {
        let polygon: [Point; 4] = corners.map(|[x, y]| (x, y));
        let bbox = BoundingBox::enclosing(&polygon);
        builder.push(text, confidence, bbox, polygon);
    }

    builder.finish()
}

/// Adapter for PaddleOCR
pub struct PaddleAdapter {
    backend: Arc<dyn PaddleBackend>,
}

impl PaddleAdapter {
    pub fn new(backend: Arc<dyn PaddleBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl OcrAdapter for PaddleAdapter {
    fn kind(&self) -> EngineKind {
        EngineKind::Paddle
    }

    async fn recognize(&self, image_path: &Path) -> Result<OcrResult, EngineError> {
        let start = Instant::now();
        let backend = Arc::clone(&self.backend);
        let path = image_path.to_path_buf();

        let pages = tokio::task::spawn_blocking(move || backend.ocr(&path))
            .await
            .map_err(|e| {
                EngineError::processing(EngineKind::Paddle, format!("worker task failed: {}", e))
            })??;

        let result = convert_lines(pages);
        debug!(
            "PaddleOCR produced {} lines in {}ms",
            result.text_blocks().len(),
            start.elapsed().as_millis()
        );
        Ok(result)
    }
}

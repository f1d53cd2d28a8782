// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! YomiToku adapter (hierarchical-layout style)
//!
//! YomiToku analyzes a page into paragraphs, tables made of cells, and
//! figures holding their own paragraphs. Units are flattened in that order
//! into text blocks with rectangular geometry. YomiToku exposes no
//! confidence, so every block carries [`DEFAULT_CONFIDENCE`].

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::engine::{EngineError, EngineKind, OcrAdapter};
use super::model::{BoundingBox, OcrResult, OcrResultBuilder, DEFAULT_CONFIDENCE};
use super::runner::RunnerCommand;
use crate::config::YomitokuConfig;

/// A paragraph or table cell as reported by YomiToku
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LayoutUnit {
    #[serde(default)]
    pub contents: Option<String>,
    /// `[x_min, y_min, x_max, y_max]`
    #[serde(default, rename = "box")]
    pub region: Option<Vec<f64>>,
}

impl LayoutUnit {
    pub fn new(contents: &str, region: [f64; 4]) -> Self {
        Self {
            contents: Some(contents.to_string()),
            region: Some(region.to_vec()),
        }
    }

    fn trimmed_text(&self) -> &str {
        self.contents.as_deref().map(str::trim).unwrap_or_default()
    }

    fn bounding_box(&self) -> Option<BoundingBox> {
        match self.region.as_deref() {
            Some(&[x_min, y_min, x_max, y_max]) => {
                Some(BoundingBox::from_corners(x_min, y_min, x_max, y_max))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Table {
    #[serde(default)]
    pub cells: Option<Vec<LayoutUnit>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Figure {
    #[serde(default)]
    pub paragraphs: Option<Vec<LayoutUnit>>,
}

/// Native YomiToku document analysis result; every part may be absent
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct YomitokuDocument {
    #[serde(default)]
    pub paragraphs: Option<Vec<LayoutUnit>>,
    #[serde(default)]
    pub tables: Option<Vec<Table>>,
    #[serde(default)]
    pub figures: Option<Vec<Figure>>,
}

impl YomitokuDocument {
    /// Units in visiting order: paragraphs, table cells, figure paragraphs
    pub fn units(&self) -> impl Iterator<Item = &LayoutUnit> {
        let paragraphs = self.paragraphs.iter().flatten();
        let cells = self
            .tables
            .iter()
            .flatten()
            .flat_map(|table| table.cells.iter().flatten());
        let figure_paragraphs = self
            .figures
            .iter()
            .flatten()
            .flat_map(|figure| figure.paragraphs.iter().flatten());

        paragraphs.chain(cells).chain(figure_paragraphs)
    }
}

/// Blocks collected from a document, plus text that had no usable region
#[derive(Debug)]
pub struct CollectedText {
    builder: OcrResultBuilder,
    unplaced: Vec<String>,
}

impl CollectedText {
    /// Whether the whole-page block is needed
    pub fn needs_page_block(&self) -> bool {
        self.builder.is_empty() && !self.unplaced.is_empty()
    }

    /// Finish the result
    ///
    /// `page_size` is only consulted when no block could be placed but text
    /// was still read; that text then becomes one block covering the page.
    pub fn finish<F>(self, page_size: F) -> Result<OcrResult, EngineError>
    where
        F: FnOnce() -> Result<(u32, u32), EngineError>,
    {
        if !self.needs_page_block() {
            if !self.unplaced.is_empty() {
                debug!(
                    "Dropping {} YomiToku units without a usable box",
                    self.unplaced.len()
                );
            }
            return Ok(self.builder.finish());
        }

        let (width, height) = page_size()?;
        let page = BoundingBox::from_corners(0.0, 0.0, f64::from(width), f64::from(height));
        let polygon = page.to_polygon();

        let mut builder = OcrResultBuilder::with_capacity(1);
        builder.push(self.unplaced.join("\n"), DEFAULT_CONFIDENCE, page, polygon);
        Ok(builder.finish())
    }
}

/// Flatten a YomiToku document into blocks
///
/// Units whose trimmed text is empty are skipped and do not consume an id.
pub fn collect_units(document: &YomitokuDocument) -> CollectedText {
    let mut builder = OcrResultBuilder::new();
    let mut unplaced = Vec::new();

    for unit in document.units() {
        let text = unit.trimmed_text();
        if text.is_empty() {
            continue;
        }

        match unit.bounding_box() {
            Some(bbox) => {
                let polygon = bbox.to_polygon();
                builder.push(text, DEFAULT_CONFIDENCE, bbox, polygon);
            }
            None => unplaced.push(text.to_string()),
        }
    }

    CollectedText { builder, unplaced }
}

/// Source of native YomiToku results
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait YomitokuBackend: Send + Sync {
    /// Check that the engine can be loaded
    fn probe(&self) -> Result<(), EngineError>;

    /// Analyze an image file
    async fn analyze(&self, image_path: &Path) -> Result<YomitokuDocument, EngineError>;
}

/// YomiToku reached through its runner program
pub struct CommandYomitokuBackend {
    command: RunnerCommand,
}

impl CommandYomitokuBackend {
    pub fn new(config: &YomitokuConfig) -> Self {
        let command = RunnerCommand::new(EngineKind::Yomitoku, config.command.clone())
            .arg("--device")
            .arg(config.device.clone());
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

#[async_trait]
impl YomitokuBackend for CommandYomitokuBackend {
    fn probe(&self) -> Result<(), EngineError> {
        self.command.probe()
    }

    async fn analyze(&self, image_path: &Path) -> Result<YomitokuDocument, EngineError> {
        let stdout = self.command.run(image_path).await?;
        self.command.parse(&stdout)
    }
}

/// Read the page size from the image header off the async runtime
async fn page_dimensions(image_path: &Path) -> Result<(u32, u32), EngineError> {
    let path = image_path.to_path_buf();
    tokio::task::spawn_blocking(move || image::image_dimensions(&path))
        .await
        .map_err(|e| EngineError::processing(EngineKind::Yomitoku, e.to_string()))?
        .map_err(|e| {
            EngineError::processing(
                EngineKind::Yomitoku,
                format!("cannot read page size: {}", e),
            )
        })
}

/// Adapter for YomiToku
pub struct YomitokuAdapter {
    backend: Arc<dyn YomitokuBackend>,
}

impl YomitokuAdapter {
    pub fn new(backend: Arc<dyn YomitokuBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl OcrAdapter for YomitokuAdapter {
    fn kind(&self) -> EngineKind {
        EngineKind::Yomitoku
    }

    async fn recognize(&self, image_path: &Path) -> Result<OcrResult, EngineError> {
        let start = Instant::now();
        let document = self.backend.analyze(image_path).await?;

        let collected = collect_units(&document);
        let page_size = if collected.needs_page_block() {
            Some(page_dimensions(image_path).await?)
        } else {
            None
        };
        let result = collected.finish(|| {
            page_size.ok_or_else(|| {
                EngineError::processing(EngineKind::Yomitoku, "page size unavailable")
            })
        })?;

        debug!(
            "YomiToku produced {} blocks in {}ms",
            result.text_blocks().len(),
            start.elapsed().as_millis()
        );
        Ok(result)
    }
}

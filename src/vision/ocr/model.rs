// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Shared OCR result schema
//!
//! Both engine adapters converge on these types. `BoundingBox` derives its
//! width/height from the corners and `OcrResult` derives `full_text` from its
//! blocks, so neither can drift from the values it summarizes.

use serde::Serialize;

/// Confidence reported for engines that do not expose a native score
pub const DEFAULT_CONFIDENCE: f64 = 0.9;

/// A polygon corner as `(x, y)`, serialized as `[x, y]`
pub type Point = (f64, f64);

/// Axis-aligned rectangle enclosing a text block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundingBox {
    x_min: f64,
    y_min: f64,
    x_max: f64,
    y_max: f64,
    width: f64,
    height: f64,
}

impl BoundingBox {
    /// Build a box from its corners; width and height are derived
    pub fn from_corners(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
            width: x_max - x_min,
            height: y_max - y_min,
        }
    }

    /// Smallest axis-aligned box containing all points of a quadrilateral
    pub fn enclosing(points: &[Point; 4]) -> Self {
        let (first_x, first_y) = points[0];
        let (x_min, y_min, x_max, y_max) = points[1..].iter().fold(
            (first_x, first_y, first_x, first_y),
            |(x_min, y_min, x_max, y_max), &(x, y)| {
                (x_min.min(x), y_min.min(y), x_max.max(x), y_max.max(y))
            },
        );
        Self::from_corners(x_min, y_min, x_max, y_max)
    }

    /// Rectangle corners in order: top-left, top-right, bottom-right, bottom-left
    pub fn to_polygon(&self) -> [Point; 4] {
        [
            (self.x_min, self.y_min),
            (self.x_max, self.y_min),
            (self.x_max, self.y_max),
            (self.x_min, self.y_max),
        ]
    }

    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

/// One recognized unit of text with its geometry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextBlock {
    /// Dense zero-based index in emission order
    pub id: usize,
    /// Recognized text
    pub text: String,
    /// Confidence score (0.0-1.0)
    pub confidence: f64,
    /// Axis-aligned bounds
    pub bbox: BoundingBox,
    /// Detected quadrilateral, as reported by the engine
    pub polygon: [Point; 4],
}

/// Result of one OCR run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OcrResult {
    full_text: String,
    text_blocks: Vec<TextBlock>,
}

impl OcrResult {
    /// Result with no detections
    pub fn empty() -> Self {
        Self {
            full_text: String::new(),
            text_blocks: Vec::new(),
        }
    }

    /// Newline-joined text of all blocks, in block order
    pub fn full_text(&self) -> &str {
        &self.full_text
    }

    pub fn text_blocks(&self) -> &[TextBlock] {
        &self.text_blocks
    }

    pub fn is_empty(&self) -> bool {
        self.text_blocks.is_empty()
    }

    pub fn into_blocks(self) -> Vec<TextBlock> {
        self.text_blocks
    }
}

impl Default for OcrResult {
    fn default() -> Self {
        Self::empty()
    }
}

/// Accumulates blocks, numbering them densely as they are pushed
#[derive(Debug, Default)]
pub struct OcrResultBuilder {
    blocks: Vec<TextBlock>,
}

impl OcrResultBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            blocks: Vec::with_capacity(capacity),
        }
    }

    /// Append a block and return the id it was given
    pub fn push(
        &mut self,
        text: impl Into<String>,
        confidence: f64,
        bbox: BoundingBox,
        polygon: [Point; 4],
    ) -> usize {
        let id = self.blocks.len();
        self.blocks.push(TextBlock {
            id,
            text: text.into(),
            confidence,
            bbox,
            polygon,
        });
        id
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn finish(self) -> OcrResult {
        let full_text = self
            .blocks
            .iter()
            .map(|block| block.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        OcrResult {
            full_text,
            text_blocks: self.blocks,
        }
    }
}

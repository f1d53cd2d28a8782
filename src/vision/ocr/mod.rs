// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! OCR engine integration
//!
//! Components:
//! - `model` - Shared result schema
//! - `engine` - Adapter contract and engine errors
//! - `runner` - External runner processes
//! - `paddle` - PaddleOCR adapter (line detector)
//! - `yomitoku` - YomiToku adapter (document layout)

pub mod engine;
pub mod model;
pub mod paddle;
pub mod runner;
pub mod yomitoku;

pub use engine::{EngineError, EngineKind, OcrAdapter, SchedulingMode};
pub use model::{BoundingBox, OcrResult, OcrResultBuilder, Point, TextBlock, DEFAULT_CONFIDENCE};
pub use paddle::{CommandPaddleBackend, PaddleAdapter, PaddleBackend, PaddleLine, PaddlePages};
pub use runner::RunnerCommand;
pub use yomitoku::{
    CommandYomitokuBackend, Figure, LayoutUnit, Table, YomitokuAdapter, YomitokuBackend,
    YomitokuDocument,
};

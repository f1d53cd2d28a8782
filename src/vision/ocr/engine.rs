// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Common adapter contract for the external OCR engines

use std::fmt;
use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

use super::model::OcrResult;

/// The closed set of supported engines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineKind {
    Paddle,
    Yomitoku,
}

impl EngineKind {
    /// Configuration identifier (`OCR_ENGINE` value)
    pub fn id(&self) -> &'static str {
        match self {
            EngineKind::Paddle => "paddle",
            EngineKind::Yomitoku => "yomitoku",
        }
    }

    /// Human-readable engine name
    pub fn label(&self) -> &'static str {
        match self {
            EngineKind::Paddle => "PaddleOCR",
            EngineKind::Yomitoku => "YomiToku",
        }
    }

    /// How the engine's recognition call relates to the async runtime
    pub fn scheduling(&self) -> SchedulingMode {
        match self {
            EngineKind::Paddle => SchedulingMode::Blocking,
            EngineKind::Yomitoku => SchedulingMode::Async,
        }
    }

    /// Match a normalized configuration value
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "paddle" => Some(EngineKind::Paddle),
            "yomitoku" => Some(EngineKind::Yomitoku),
            _ => None,
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Scheduling mode of an engine's recognition call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulingMode {
    /// Blocks its thread for the whole call; run on the blocking pool
    Blocking,
    /// Yields to the runtime while the engine works
    Async,
}

impl fmt::Display for SchedulingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulingMode::Blocking => f.write_str("blocking"),
            SchedulingMode::Async => f.write_str("async"),
        }
    }
}

/// Failures raised by an engine
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EngineError {
    /// Engine is not installed or cannot be loaded
    #[error("{engine} is not available: {reason}")]
    Unavailable { engine: EngineKind, reason: String },

    /// Engine failed while recognizing
    #[error("{engine} OCR failed: {message}")]
    ProcessingFailed { engine: EngineKind, message: String },
}

impl EngineError {
    pub fn unavailable(engine: EngineKind, reason: impl Into<String>) -> Self {
        EngineError::Unavailable {
            engine,
            reason: reason.into(),
        }
    }

    pub fn processing(engine: EngineKind, message: impl Into<String>) -> Self {
        EngineError::ProcessingFailed {
            engine,
            message: message.into(),
        }
    }

    pub fn engine(&self) -> EngineKind {
        match self {
            EngineError::Unavailable { engine, .. }
            | EngineError::ProcessingFailed { engine, .. } => *engine,
        }
    }
}

/// Converts one engine's native output into the shared schema
///
/// Callers always await `recognize`; blocking engines hand their work to the
/// blocking thread pool internally.
#[async_trait]
pub trait OcrAdapter: Send + Sync {
    /// Engine behind this adapter
    fn kind(&self) -> EngineKind;

    /// Recognize text in the image stored at `image_path`
    async fn recognize(&self, image_path: &Path) -> Result<OcrResult, EngineError>;
}

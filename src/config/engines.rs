// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! OCR engine settings

use clap::Args;

/// Which engine to run and how to reach each one
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// OCR engine: "paddle" or "yomitoku" (unknown values fall back to paddle)
    #[arg(
        id = "ocr_engine",
        long = "ocr-engine",
        env = "OCR_ENGINE",
        default_value = "paddle"
    )]
    pub engine: String,

    #[command(flatten)]
    pub paddle: PaddleConfig,

    #[command(flatten)]
    pub yomitoku: YomitokuConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            engine: "paddle".to_string(),
            paddle: PaddleConfig::default(),
            yomitoku: YomitokuConfig::default(),
        }
    }
}

/// PaddleOCR runner settings
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct PaddleConfig {
    /// Program printing PaddleOCR results as JSON
    #[arg(
        id = "paddle_command",
        long = "paddle-command",
        env = "PADDLE_OCR_COMMAND",
        default_value = "paddleocr-runner"
    )]
    pub command: String,

    /// Recognition language passed to PaddleOCR
    #[arg(
        id = "paddle_lang",
        long = "paddle-lang",
        env = "PADDLE_OCR_LANG",
        default_value = "japan"
    )]
    pub lang: String,
}

impl Default for PaddleConfig {
    fn default() -> Self {
        Self {
            command: "paddleocr-runner".to_string(),
            lang: "japan".to_string(),
        }
    }
}

/// YomiToku runner settings
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct YomitokuConfig {
    /// Program printing YomiToku document analysis as JSON
    #[arg(
        id = "yomitoku_command",
        long = "yomitoku-command",
        env = "YOMITOKU_COMMAND",
        default_value = "yomitoku-runner"
    )]
    pub command: String,

    /// Device YomiToku runs on
    #[arg(
        id = "yomitoku_device",
        long = "yomitoku-device",
        env = "YOMITOKU_DEVICE",
        default_value = "cpu"
    )]
    pub device: String,
}

impl Default for YomitokuConfig {
    fn default() -> Self {
        Self {
            command: "yomitoku-runner".to_string(),
            device: "cpu".to_string(),
        }
    }
}

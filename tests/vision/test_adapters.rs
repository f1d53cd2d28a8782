// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Adapter tests against stand-in runner programs
//!
//! A small `sh` script plays the engine runner: it prints canned JSON in the
//! runner format, so the full path from child process to OcrResult is
//! exercised without PaddleOCR or YomiToku installed.

#![cfg(unix)]

use ocr_gateway::vision::ocr::{
    CommandPaddleBackend, CommandYomitokuBackend, EngineError, EngineKind, OcrAdapter,
    PaddleAdapter, PaddleBackend, RunnerCommand, YomitokuAdapter, YomitokuBackend,
};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// Runner that prints `json` for any image and passes `--check`
fn script_runner(engine: EngineKind, json: &str) -> RunnerCommand {
    RunnerCommand::new(engine, "sh")
        .arg("-c")
        .arg(format!("cat <<'EOF'\n{}\nEOF", json))
}

fn write_png(dir: &TempDir, width: u32, height: u32) -> std::path::PathBuf {
    let path = dir.path().join("page.png");
    image::DynamicImage::ImageRgb8(image::RgbImage::new(width, height))
        .save(&path)
        .unwrap();
    path
}

const PADDLE_OUTPUT: &str = r#"[[
  [[[10, 12], [120, 10], [122, 40], [8, 42]], ["請求書", 0.991]],
  [[[10, 50], [200, 50], [200, 80], [10, 80]], ["合計 12,000円", 0.87]]
]]"#;

const YOMITOKU_OUTPUT: &str = r#"{
  "paragraphs": [
    {"contents": "  見積書  ", "box": [5, 5, 150, 30]},
    {"contents": "   ", "box": [5, 40, 150, 60]}
  ],
  "tables": [
    {"cells": [
      {"contents": "品名", "box": [5, 100, 80, 120]},
      {"contents": "数量", "box": [80, 100, 150, 120]}
    ]}
  ],
  "figures": [
    {"paragraphs": [{"contents": "図1", "box": [200, 5, 260, 25]}]}
  ]
}"#;

#[cfg(test)]
mod adapter_tests {
    use super::*;

    #[tokio::test]
    async fn test_paddle_runner_output() {
        let backend = CommandPaddleBackend::from_command(script_runner(
            EngineKind::Paddle,
            PADDLE_OUTPUT,
        ));
        let adapter = PaddleAdapter::new(Arc::new(backend));

        let result = adapter.recognize(Path::new("/tmp/invoice.png")).await.unwrap();

        assert_eq!(result.full_text(), "請求書\n合計 12,000円");
        let blocks = result.text_blocks();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].id, 0);
        assert_eq!(blocks[0].confidence, 0.991);
        assert_eq!(blocks[0].bbox.x_min(), 8.0);
        assert_eq!(blocks[0].bbox.y_min(), 10.0);
        assert_eq!(blocks[0].bbox.x_max(), 122.0);
        assert_eq!(blocks[0].bbox.y_max(), 42.0);
        assert_eq!(blocks[0].polygon[3], (8.0, 42.0));
        assert_eq!(blocks[1].id, 1);
    }

    #[tokio::test]
    async fn test_paddle_null_output_is_empty() {
        let backend =
            CommandPaddleBackend::from_command(script_runner(EngineKind::Paddle, "null"));
        let adapter = PaddleAdapter::new(Arc::new(backend));

        let result = adapter.recognize(Path::new("/tmp/blank.png")).await.unwrap();
        assert!(result.is_empty());
        assert_eq!(result.full_text(), "");
    }

    #[tokio::test]
    async fn test_paddle_runner_crash() {
        let runner = RunnerCommand::new(EngineKind::Paddle, "sh")
            .arg("-c")
            .arg("echo 'RuntimeError: predictor failed' >&2; exit 1");
        let adapter = PaddleAdapter::new(Arc::new(CommandPaddleBackend::from_command(runner)));

        let err = adapter.recognize(Path::new("/tmp/x.png")).await.unwrap_err();
        match err {
            EngineError::ProcessingFailed { engine, message } => {
                assert_eq!(engine, EngineKind::Paddle);
                assert!(message.contains("predictor failed"), "{}", message);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_paddle_garbage_output() {
        let backend = CommandPaddleBackend::from_command(script_runner(
            EngineKind::Paddle,
            "Downloading model weights...",
        ));
        let adapter = PaddleAdapter::new(Arc::new(backend));

        let err = adapter.recognize(Path::new("/tmp/x.png")).await.unwrap_err();
        assert!(matches!(err, EngineError::ProcessingFailed { .. }));
    }

    #[tokio::test]
    async fn test_yomitoku_runner_output() {
        let backend = CommandYomitokuBackend::from_command(script_runner(
            EngineKind::Yomitoku,
            YOMITOKU_OUTPUT,
        ));
        let adapter = YomitokuAdapter::new(Arc::new(backend));

        let result = adapter.recognize(Path::new("/tmp/quote.png")).await.unwrap();

        assert_eq!(result.full_text(), "見積書\n品名\n数量\n図1");
        let ids: Vec<usize> = result.text_blocks().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        assert!(result.text_blocks().iter().all(|b| b.confidence == 0.9));

        let cell = &result.text_blocks()[2];
        assert_eq!(cell.bbox.width(), 70.0);
        assert_eq!(
            cell.polygon,
            [(80.0, 100.0), (150.0, 100.0), (150.0, 120.0), (80.0, 120.0)]
        );
    }

    #[tokio::test]
    async fn test_yomitoku_whole_page_fallback() {
        let dir = TempDir::new().unwrap();
        let image = write_png(&dir, 640, 480);
        let backend = CommandYomitokuBackend::from_command(script_runner(
            EngineKind::Yomitoku,
            r#"{"paragraphs": [
                {"contents": "縦書きの本文"},
                {"contents": "second", "box": [1, 2]}
            ]}"#,
        ));
        let adapter = YomitokuAdapter::new(Arc::new(backend));

        let result = adapter.recognize(&image).await.unwrap();

        assert_eq!(result.text_blocks().len(), 1);
        let page = &result.text_blocks()[0];
        assert_eq!(page.text, "縦書きの本文\nsecond");
        assert_eq!(result.full_text(), page.text);
        assert_eq!(page.bbox.x_max(), 640.0);
        assert_eq!(page.bbox.y_max(), 480.0);
        assert_eq!(page.confidence, 0.9);
    }

    #[tokio::test]
    async fn test_yomitoku_fallback_unreadable_page() {
        let dir = TempDir::new().unwrap();
        let backend = CommandYomitokuBackend::from_command(script_runner(
            EngineKind::Yomitoku,
            r#"{"paragraphs": [{"contents": "no box"}]}"#,
        ));
        let adapter = YomitokuAdapter::new(Arc::new(backend));

        let err = adapter
            .recognize(&dir.path().join("missing.png"))
            .await
            .unwrap_err();
        match err {
            EngineError::ProcessingFailed { engine, message } => {
                assert_eq!(engine, EngineKind::Yomitoku);
                assert!(message.contains("cannot read page size"), "{}", message);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_yomitoku_empty_document() {
        let backend =
            CommandYomitokuBackend::from_command(script_runner(EngineKind::Yomitoku, "{}"));
        let adapter = YomitokuAdapter::new(Arc::new(backend));

        let result = adapter.recognize(Path::new("/tmp/blank.png")).await.unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_probe_uses_check_flag() {
        let passes = RunnerCommand::new(EngineKind::Yomitoku, "sh")
            .arg("-c")
            .arg("[ \"$0\" = --check ]");
        assert!(CommandYomitokuBackend::from_command(passes).probe().is_ok());

        let fails = RunnerCommand::new(EngineKind::Yomitoku, "sh")
            .arg("-c")
            .arg("echo \"No module named 'yomitoku'\" >&2; exit 1");
        let err = CommandYomitokuBackend::from_command(fails)
            .probe()
            .unwrap_err();
        assert!(matches!(err, EngineError::Unavailable { .. }));
        assert!(err.to_string().contains("No module named"));
    }

    #[test]
    fn test_missing_runner_is_unavailable() {
        let runner = RunnerCommand::new(EngineKind::Paddle, "no-such-paddleocr-runner-7731");
        let backend = CommandPaddleBackend::from_command(runner);
        assert!(matches!(
            backend.probe(),
            Err(EngineError::Unavailable { .. })
        ));
    }
}

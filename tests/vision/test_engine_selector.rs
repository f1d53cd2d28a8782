// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Engine selection tests
//!
//! These tests verify that select_engine:
//! - Honors "paddle" and "yomitoku" regardless of case and whitespace
//! - Falls back to PaddleOCR when YomiToku cannot be loaded
//! - Uses PaddleOCR for unrecognized names
//! - Hands out an adapter that reaches the chosen backend

use async_trait::async_trait;
use ocr_gateway::vision::{
    ocr::{
        EngineError, EngineKind, LayoutUnit, PaddleBackend, PaddleLine, PaddlePages,
        SchedulingMode, YomitokuBackend, YomitokuDocument,
    },
    select_engine, EngineBackends, SelectionNote,
};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct StubPaddle {
    probes: AtomicUsize,
    calls: AtomicUsize,
}

impl PaddleBackend for StubPaddle {
    fn probe(&self) -> Result<(), EngineError> {
        self.probes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn ocr(&self, _image_path: &Path) -> Result<PaddlePages, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Some(vec![Some(vec![PaddleLine(
            [[0.0, 0.0], [10.0, 0.0], [10.0, 5.0], [0.0, 5.0]],
            ("paddle".to_string(), 0.8),
        )])]))
    }
}

struct StubYomitoku {
    loadable: bool,
    probes: AtomicUsize,
}

impl StubYomitoku {
    fn new(loadable: bool) -> Self {
        Self {
            loadable,
            probes: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl YomitokuBackend for StubYomitoku {
    fn probe(&self) -> Result<(), EngineError> {
        self.probes.fetch_add(1, Ordering::SeqCst);
        if self.loadable {
            Ok(())
        } else {
            Err(EngineError::unavailable(
                EngineKind::Yomitoku,
                "No module named 'yomitoku'",
            ))
        }
    }

    async fn analyze(&self, _image_path: &Path) -> Result<YomitokuDocument, EngineError> {
        Ok(YomitokuDocument {
            paragraphs: Some(vec![LayoutUnit::new("yomitoku", [0.0, 0.0, 20.0, 10.0])]),
            ..YomitokuDocument::default()
        })
    }
}

fn backends(yomitoku_loads: bool) -> (EngineBackends, Arc<StubPaddle>, Arc<StubYomitoku>) {
    let paddle = Arc::new(StubPaddle::default());
    let yomitoku = Arc::new(StubYomitoku::new(yomitoku_loads));
    let backends = EngineBackends {
        paddle: paddle.clone(),
        yomitoku: yomitoku.clone(),
    };
    (backends, paddle, yomitoku)
}

#[cfg(test)]
mod engine_selector_tests {
    use super::*;

    #[tokio::test]
    async fn test_paddle_selected() {
        let (backends, paddle, yomitoku) = backends(true);
        let selection = select_engine("paddle", backends);

        assert_eq!(selection.active(), EngineKind::Paddle);
        assert_eq!(selection.display_name(), "PaddleOCR");
        assert_eq!(selection.scheduling(), SchedulingMode::Blocking);
        assert!(selection.note().is_none());
        assert_eq!(yomitoku.probes.load(Ordering::SeqCst), 0);

        let result = selection
            .adapter()
            .recognize(Path::new("/tmp/page.png"))
            .await
            .unwrap();
        assert_eq!(result.full_text(), "paddle");
        assert_eq!(paddle.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_yomitoku_selected_case_insensitive() {
        let (backends, paddle, yomitoku) = backends(true);
        let selection = select_engine("  YOMITOKU\n", backends);

        assert_eq!(selection.active(), EngineKind::Yomitoku);
        assert_eq!(selection.display_name(), "YomiToku");
        assert_eq!(selection.requested_id(), "yomitoku");
        assert_eq!(selection.scheduling(), SchedulingMode::Async);
        assert_eq!(yomitoku.probes.load(Ordering::SeqCst), 1);

        let result = selection
            .adapter()
            .recognize(Path::new("/tmp/page.png"))
            .await
            .unwrap();
        assert_eq!(result.full_text(), "yomitoku");
        assert_eq!(paddle.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_yomitoku_fallback() {
        let (backends, paddle, _yomitoku) = backends(false);
        let selection = select_engine("yomitoku", backends);

        assert_eq!(selection.active(), EngineKind::Paddle);
        assert_eq!(selection.display_name(), "PaddleOCR (fallback)");
        assert_eq!(selection.requested_id(), "yomitoku");
        assert!(selection.is_fallback());
        assert!(matches!(
            selection.note(),
            Some(SelectionNote::Fallback {
                requested: EngineKind::Yomitoku,
                ..
            })
        ));

        let result = selection
            .adapter()
            .recognize(Path::new("/tmp/page.png"))
            .await
            .unwrap();
        assert_eq!(result.full_text(), "paddle");
        assert_eq!(paddle.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unrecognized_defaults_to_paddle() {
        for name in ["tesseract", "", "   "] {
            let (backends, _paddle, yomitoku) = backends(true);
            let selection = select_engine(name, backends);

            assert_eq!(selection.active(), EngineKind::Paddle);
            assert_eq!(selection.display_name(), "PaddleOCR (default)");
            assert_eq!(selection.requested_id(), name.trim());
            assert!(matches!(
                selection.note(),
                Some(SelectionNote::Unrecognized { .. })
            ));
            assert_eq!(yomitoku.probes.load(Ordering::SeqCst), 0);
        }
    }

    #[test]
    fn test_paddle_not_probed_at_startup() {
        let (backends, paddle, _yomitoku) = backends(true);
        let _selection = select_engine("paddle", backends);
        assert_eq!(paddle.probes.load(Ordering::SeqCst), 0);
    }
}

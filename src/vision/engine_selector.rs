// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Engine selection at startup
//!
//! One configuration value names the engine. It is resolved exactly once into
//! an adapter that stays active for the lifetime of the process. A requested
//! engine that cannot be loaded, or a name that is not recognized, falls back
//! to PaddleOCR.

use std::fmt;
use std::sync::Arc;

use tracing::{info, warn};

use super::ocr::{
    CommandPaddleBackend, CommandYomitokuBackend, EngineKind, OcrAdapter, PaddleAdapter,
    PaddleBackend, SchedulingMode, YomitokuAdapter, YomitokuBackend,
};
use crate::config::EngineConfig;

/// Native engine sources the selector can choose from
#[derive(Clone)]
pub struct EngineBackends {
    pub paddle: Arc<dyn PaddleBackend>,
    pub yomitoku: Arc<dyn YomitokuBackend>,
}

impl EngineBackends {
    /// Runner-backed engines as configured
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            paddle: Arc::new(CommandPaddleBackend::new(&config.paddle)),
            yomitoku: Arc::new(CommandYomitokuBackend::new(&config.yomitoku)),
        }
    }
}

/// Why the active engine differs from the requested one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionNote {
    /// The requested engine could not be loaded
    Fallback { requested: EngineKind, reason: String },
    /// The requested name matches no engine
    Unrecognized { requested: String },
}

impl fmt::Display for SelectionNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionNote::Fallback { requested, reason } => {
                write!(f, "{} unavailable ({}), using PaddleOCR", requested, reason)
            }
            SelectionNote::Unrecognized { requested } => {
                write!(f, "unknown OCR engine '{}', using PaddleOCR", requested)
            }
        }
    }
}

/// The engine chosen for this process
#[derive(Clone)]
pub struct EngineSelection {
    requested: String,
    active: EngineKind,
    note: Option<SelectionNote>,
    adapter: Arc<dyn OcrAdapter>,
}

impl EngineSelection {
    /// Use `adapter` directly, as if its engine had been requested
    pub fn with_adapter(adapter: Arc<dyn OcrAdapter>) -> Self {
        let active = adapter.kind();
        Self {
            requested: active.id().to_string(),
            active,
            note: None,
            adapter,
        }
    }

    /// Normalized configured engine id, as reported to clients
    pub fn requested_id(&self) -> &str {
        &self.requested
    }

    pub fn active(&self) -> EngineKind {
        self.active
    }

    pub fn scheduling(&self) -> SchedulingMode {
        self.active.scheduling()
    }

    pub fn note(&self) -> Option<&SelectionNote> {
        self.note.as_ref()
    }

    pub fn is_fallback(&self) -> bool {
        self.note.is_some()
    }

    pub fn adapter(&self) -> &Arc<dyn OcrAdapter> {
        &self.adapter
    }

    /// Service name shown by `/health` and `/`
    pub fn display_name(&self) -> String {
        match &self.note {
            None => self.active.label().to_string(),
            Some(SelectionNote::Fallback { .. }) => format!("{} (fallback)", self.active.label()),
            Some(SelectionNote::Unrecognized { .. }) => {
                format!("{} (default)", self.active.label())
            }
        }
    }
}

impl fmt::Debug for EngineSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineSelection")
            .field("requested", &self.requested)
            .field("active", &self.active)
            .field("note", &self.note)
            .finish_non_exhaustive()
    }
}

/// Resolve the configured engine name to one adapter
pub fn select_engine(requested: &str, backends: EngineBackends) -> EngineSelection {
    let requested = requested.trim().to_lowercase();

    let (active, note) = match EngineKind::from_id(&requested) {
        Some(EngineKind::Yomitoku) => match backends.yomitoku.probe() {
            Ok(()) => (EngineKind::Yomitoku, None),
            Err(e) => {
                warn!("⚠️ YomiToku not available, falling back to PaddleOCR: {}", e);
                (
                    EngineKind::Paddle,
                    Some(SelectionNote::Fallback {
                        requested: EngineKind::Yomitoku,
                        reason: e.to_string(),
                    }),
                )
            }
        },
        Some(EngineKind::Paddle) => (EngineKind::Paddle, None),
        None => {
            warn!("Unknown OCR_ENGINE '{}', using PaddleOCR", requested);
            (
                EngineKind::Paddle,
                Some(SelectionNote::Unrecognized {
                    requested: requested.clone(),
                }),
            )
        }
    };

    let adapter: Arc<dyn OcrAdapter> = match active {
        EngineKind::Yomitoku => Arc::new(YomitokuAdapter::new(backends.yomitoku)),
        EngineKind::Paddle => Arc::new(PaddleAdapter::new(backends.paddle)),
    };

    let selection = EngineSelection {
        requested,
        active,
        note,
        adapter,
    };
    info!(
        "✅ OCR engine: {} ({} scheduling)",
        selection.display_name(),
        selection.scheduling()
    );
    selection
}

// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the OCR gateway

/// Semantic version number
pub const VERSION_NUMBER: &str = env!("CARGO_PKG_VERSION");

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "paddleocr",
    "yomitoku",
    "engine-fallback",
    "text-positions",
    "image-info",
    "random-temp-names",
];

/// Engine ids accepted by OCR_ENGINE
pub const SUPPORTED_ENGINES: &[&str] = &["paddle", "yomitoku"];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("OCR Gateway {}", VERSION_NUMBER)
}

/// Get full version info
pub fn get_version_info() -> serde_json::Value {
    serde_json::json!({
        "version": VERSION_NUMBER,
        "features": FEATURES,
        "engines": SUPPORTED_ENGINES,
    })
}

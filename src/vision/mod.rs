// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Vision processing module
//!
//! This module provides:
//! - OCR through an external engine (PaddleOCR or YomiToku)
//! - Engine selection with fallback
//! - Upload staging and image probing for the HTTP layer

pub mod engine_selector;
pub mod image_utils;
pub mod ocr;
pub mod staging;

pub use engine_selector::{select_engine, EngineBackends, EngineSelection, SelectionNote};
pub use image_utils::{format_name, probe_image, ImageError, ImageInfo};
pub use staging::{StagedImage, StagingArea, StagingError};

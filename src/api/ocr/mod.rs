// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! OCR API endpoint module
//!
//! Provides POST /ocr/ and POST /ocr/with-positions/ for extracting text
//! from uploaded images.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::{ocr_handler, ocr_with_positions_handler, recognize, recognize_with_image};
pub use request::ImageUpload;
pub use response::OcrWithImageResponse;

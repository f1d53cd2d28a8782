// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! OCR response types

use serde::Serialize;

use crate::vision::ocr::OcrResult;
use crate::vision::ImageInfo;

/// OCR result plus the dimensions and format of the uploaded image
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OcrWithImageResponse {
    #[serde(flatten)]
    pub result: OcrResult,
    pub image_info: ImageInfo,
}

impl OcrWithImageResponse {
    pub fn new(result: OcrResult, image_info: ImageInfo) -> Self {
        Self { result, image_info }
    }
}

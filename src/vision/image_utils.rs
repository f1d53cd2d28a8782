// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image probing for uploaded files

use std::io::Cursor;

use image::{ImageFormat, ImageReader};
use serde::Serialize;
use thiserror::Error;

/// Custom error types for image probing
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Unsupported image format")]
    UnsupportedFormat,

    #[error("Failed to decode image: {0}")]
    DecodeFailed(String),

    #[error("Image data is empty")]
    EmptyData,
}

/// Dimensions and format of an uploaded image
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageInfo {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Format name, e.g. "PNG" or "JPEG"
    pub format: String,
}

/// Report the dimensions and format of image bytes
///
/// Only the image header is read, so the cost does not grow with the
/// pixel count of the upload.
///
/// # Arguments
/// * `bytes` - Raw image bytes as uploaded
///
/// # Returns
/// * `Ok(ImageInfo)` - Width, height and format name
/// * `Err(ImageError)` - If the format is unknown or the header is unreadable
pub fn probe_image(bytes: &[u8]) -> Result<ImageInfo, ImageError> {
    if bytes.is_empty() {
        return Err(ImageError::EmptyData);
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| ImageError::DecodeFailed(e.to_string()))?;
    let format = reader.format().ok_or(ImageError::UnsupportedFormat)?;

    let (width, height) = reader.into_dimensions().map_err(|e| match e {
        image::ImageError::Unsupported(_) => ImageError::UnsupportedFormat,
        other => ImageError::DecodeFailed(other.to_string()),
    })?;

    Ok(ImageInfo {
        width,
        height,
        format: format_name(format),
    })
}

/// Upper-case format name reported to clients
pub fn format_name(format: ImageFormat) -> String {
    match format {
        ImageFormat::Jpeg => "JPEG".to_string(),
        ImageFormat::WebP => "WEBP".to_string(),
        other => other
            .extensions_str()
            .first()
            .map(|ext| ext.to_uppercase())
            .unwrap_or_else(|| format!("{:?}", other).to_uppercase()),
    }
}

// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! OCR endpoint handlers

use std::time::Instant;

use axum::{extract::State, Json};
use axum_extra::extract::Multipart;
use tracing::{debug, info, warn};

use super::request::ImageUpload;
use super::response::OcrWithImageResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::vision::ocr::OcrResult;
use crate::vision::{probe_image, ImageInfo};

/// POST /ocr/ - Extract text from an uploaded image
///
/// Accepts a multipart form with one image in the `file` field and returns
/// the recognized text with per-block geometry.
///
/// # Response
/// - `full_text`: All block texts joined with newlines
/// - `text_blocks`: Blocks with `id`, `text`, `confidence`, `bbox`, `polygon`
///
/// # Errors
/// - 400 Bad Request: Upload is not declared as an image
/// - 422 Unprocessable Entity: No `file` field
/// - 500 Internal Server Error: Staging, engine or cleanup failure
pub async fn ocr_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<OcrResult>, ApiError> {
    let upload = ImageUpload::from_multipart(multipart).await?;
    let result = recognize(&state, &upload).await?;
    Ok(Json(result))
}

/// POST /ocr/with-positions/ - Extract text and report image dimensions
///
/// Same input and errors as [`ocr_handler`]; the response additionally
/// carries `image_info` (`width`, `height`, `format`). An image that cannot
/// be decoded is a 500.
pub async fn ocr_with_positions_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<OcrWithImageResponse>, ApiError> {
    let upload = ImageUpload::from_multipart(multipart).await?;
    let response = recognize_with_image(&state, &upload).await?;
    Ok(Json(response))
}

/// Validate, stage and recognize one upload
pub async fn recognize(state: &AppState, upload: &ImageUpload) -> Result<OcrResult, ApiError> {
    upload.validate()?;
    run_engine(state, upload).await
}

/// [`recognize`] plus the uploaded image's dimensions and format
pub async fn recognize_with_image(
    state: &AppState,
    upload: &ImageUpload,
) -> Result<OcrWithImageResponse, ApiError> {
    upload.validate()?;

    let image_info = probe_upload(upload).await?;
    debug!(
        "Probed upload: {}x{} {}",
        image_info.width, image_info.height, image_info.format
    );

    let result = run_engine(state, upload).await?;
    Ok(OcrWithImageResponse::new(result, image_info))
}

async fn probe_upload(upload: &ImageUpload) -> Result<ImageInfo, ApiError> {
    let bytes = upload.bytes.clone();
    let info = tokio::task::spawn_blocking(move || probe_image(&bytes))
        .await
        .map_err(|e| ApiError::DecodeFailure(format!("image probe task failed: {}", e)))??;
    Ok(info)
}

/// Stage the upload, run the active engine on it, and remove the staged file
///
/// The staged file is removed on every path: explicitly here, or by its drop
/// guard if this future errors out early or is cancelled.
async fn run_engine(state: &AppState, upload: &ImageUpload) -> Result<OcrResult, ApiError> {
    let staged = state
        .staging
        .stage(upload.file_name.as_deref(), &upload.bytes)
        .await?;

    let start = Instant::now();
    let engine = state.engine.active();
    let outcome = state.engine.adapter().recognize(staged.path()).await;
    let cleanup = staged.remove();

    let result = match (outcome, cleanup) {
        (Ok(result), Ok(())) => result,
        (Ok(_), Err(e)) => return Err(e.into()),
        (Err(e), cleanup) => {
            if let Err(cleanup_err) = cleanup {
                warn!("{}", cleanup_err);
            }
            return Err(e.into());
        }
    };

    info!(
        "OCR complete ({}): {} blocks, {} chars, {}ms",
        engine,
        result.text_blocks().len(),
        result.full_text().chars().count(),
        start.elapsed().as_millis()
    );

    Ok(result)
}

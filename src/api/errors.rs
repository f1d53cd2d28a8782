// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use crate::vision::ocr::EngineError;
use crate::vision::{ImageError, StagingError};

/// Message returned when the upload is not declared as an image
pub const INVALID_IMAGE_TYPE: &str = "Invalid file format. Only images are allowed.";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub detail: String,
}

#[derive(Debug, Clone)]
pub enum ApiError {
    InvalidInput(String),
    MissingField(String),
    MalformedUpload(String),
    EngineUnavailable(String),
    ProcessingFailed(String),
    IoFailure(String),
    DecodeFailure(String),
}

impl ApiError {
    /// Upload declared with a non-image content type
    pub fn invalid_image_type() -> Self {
        ApiError::InvalidInput(INVALID_IMAGE_TYPE.to_string())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) | ApiError::MalformedUpload(_) => StatusCode::BAD_REQUEST,
            ApiError::MissingField(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::EngineUnavailable(_)
            | ApiError::ProcessingFailed(_)
            | ApiError::IoFailure(_)
            | ApiError::DecodeFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text placed in the `detail` field
    pub fn detail(&self) -> String {
        match self {
            ApiError::InvalidInput(msg)
            | ApiError::MalformedUpload(msg)
            | ApiError::EngineUnavailable(msg)
            | ApiError::ProcessingFailed(msg)
            | ApiError::IoFailure(msg)
            | ApiError::DecodeFailure(msg) => msg.clone(),
            ApiError::MissingField(field) => format!("Field '{}' is required", field),
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            detail: self.detail(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            ApiError::MissingField(field) => write!(f, "Missing field: {}", field),
            ApiError::MalformedUpload(msg) => write!(f, "Malformed upload: {}", msg),
            ApiError::EngineUnavailable(msg) => write!(f, "Engine unavailable: {}", msg),
            ApiError::ProcessingFailed(msg) => write!(f, "Processing failed: {}", msg),
            ApiError::IoFailure(msg) => write!(f, "I/O failure: {}", msg),
            ApiError::DecodeFailure(msg) => write!(f, "Decode failure: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Unavailable { .. } => ApiError::EngineUnavailable(err.to_string()),
            EngineError::ProcessingFailed { .. } => ApiError::ProcessingFailed(err.to_string()),
        }
    }
}

impl From<StagingError> for ApiError {
    fn from(err: StagingError) -> Self {
        ApiError::IoFailure(err.to_string())
    }
}

impl From<ImageError> for ApiError {
    fn from(err: ImageError) -> Self {
        ApiError::DecodeFailure(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            warn!("Request failed: {}", self);
        }
        (status, Json(self.to_response())).into_response()
    }
}

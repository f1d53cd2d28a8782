// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Upload extraction and validation

use axum::body::Bytes;
use axum_extra::extract::Multipart;
use tracing::debug;

use crate::api::errors::ApiError;

/// Name of the multipart field carrying the image
pub const FILE_FIELD: &str = "file";

/// An uploaded image as received from the client
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Client-side filename, if sent
    pub file_name: Option<String>,
    /// Declared content type, if sent
    pub content_type: Option<String>,
    /// Raw image bytes
    pub bytes: Bytes,
}

impl ImageUpload {
    pub fn new(
        file_name: Option<&str>,
        content_type: Option<&str>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.map(str::to_string),
            content_type: content_type.map(str::to_string),
            bytes: bytes.into(),
        }
    }

    /// Read the `file` field from a multipart body; other fields are ignored
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::MalformedUpload(e.to_string()))?
        {
            if field.name() != Some(FILE_FIELD) {
                debug!("Ignoring multipart field {:?}", field.name());
                continue;
            }

            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::MalformedUpload(e.to_string()))?;

            return Ok(Self {
                file_name,
                content_type,
                bytes,
            });
        }

        Err(ApiError::MissingField(FILE_FIELD.to_string()))
    }

    /// Validate the upload
    ///
    /// Only the declared content type is checked; the engine decides whether
    /// the bytes are readable.
    pub fn validate(&self) -> Result<(), ApiError> {
        match self.content_type.as_deref() {
            Some(content_type) if content_type.starts_with("image") => Ok(()),
            _ => Err(ApiError::invalid_image_type()),
        }
    }
}

// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Temporary staging of uploads for the OCR engines
//!
//! Engines read images from disk, so every upload is written to a randomly
//! named file for the duration of one request. A [`StagedImage`] removes its
//! file when dropped, which covers error returns and cancelled requests; the
//! normal path calls [`StagedImage::remove`] to surface removal failures.

use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempPath;
use thiserror::Error;
use tracing::debug;

const FILE_PREFIX: &str = "ocr-";

/// Longest extension carried over from an uploaded filename
const MAX_EXTENSION_LEN: usize = 8;

#[derive(Debug, Error)]
pub enum StagingError {
    #[error("Failed to create temporary file in {dir}: {source}")]
    Create {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write temporary file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to remove temporary file {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Directory where uploads are staged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagingArea {
    dir: PathBuf,
}

impl StagingArea {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Stage into the system temporary directory
    pub fn system() -> Self {
        Self::new(std::env::temp_dir())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `bytes` to a fresh, uniquely named file
    ///
    /// The uploaded filename only contributes its extension, so concurrent
    /// uploads with identical names never share a path.
    pub async fn stage(
        &self,
        original_name: Option<&str>,
        bytes: &[u8],
    ) -> Result<StagedImage, StagingError> {
        let suffix = extension_suffix(original_name);
        let file = tempfile::Builder::new()
            .prefix(FILE_PREFIX)
            .suffix(&suffix)
            .tempfile_in(&self.dir)
            .map_err(|source| StagingError::Create {
                dir: self.dir.clone(),
                source,
            })?;

        // Closing the handle keeps the file; the path now owns its removal
        let path = file.into_temp_path();

        if let Err(source) = tokio::fs::write(&path, bytes).await {
            return Err(StagingError::Write {
                path: path.to_path_buf(),
                source,
            });
        }

        debug!("Staged {} bytes at {}", bytes.len(), path.display());
        Ok(StagedImage { path })
    }
}

impl Default for StagingArea {
    fn default() -> Self {
        Self::system()
    }
}

/// An upload on disk; the file is deleted when this value goes away
#[derive(Debug)]
pub struct StagedImage {
    path: TempPath,
}

impl StagedImage {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the file now, reporting failure
    pub fn remove(self) -> Result<(), StagingError> {
        let path = self.path.to_path_buf();
        self.path
            .close()
            .map_err(|source| StagingError::Remove { path, source })
    }
}

/// `.ext` from an uploaded filename when it is short and alphanumeric
fn extension_suffix(original_name: Option<&str>) -> String {
    original_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| {
            !ext.is_empty()
                && ext.len() <= MAX_EXTENSION_LEN
                && ext.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default()
}

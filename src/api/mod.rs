// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod errors;
pub mod handlers;
pub mod http_server;
pub mod ocr;

pub use errors::{ApiError, ErrorResponse};
pub use handlers::{HealthResponse, ServiceDescriptor};
pub use http_server::{create_app, create_app_with_options, start_server, AppState, RouterOptions};
pub use ocr::{ocr_handler, ocr_with_positions_handler, ImageUpload, OcrWithImageResponse};

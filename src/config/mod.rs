// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Runtime configuration
//!
//! Every setting is a command-line flag backed by an environment variable;
//! binaries load `.env` before parsing.

pub mod engines;
pub mod server;

pub use engines::{EngineConfig, PaddleConfig, YomitokuConfig};
pub use server::{ServerConfig, DEFAULT_MAX_UPLOAD_BYTES};

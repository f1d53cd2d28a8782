// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod recognize;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::EngineConfig;

/// OCR gateway CLI
#[derive(Parser, Debug)]
#[command(name = "ocr-cli")]
#[command(version)]
#[command(about = "Run the OCR engines without the HTTP server", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub engines: EngineConfig,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Recognize text in one image file
    Recognize(recognize::RecognizeArgs),

    /// Show which engine the current configuration resolves to
    Engine,
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Recognize(args) => recognize::recognize_file(&cli.engines, args).await,
        Commands::Engine => recognize::show_engine(&cli.engines),
    }
}

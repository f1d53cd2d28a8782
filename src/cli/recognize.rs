// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::info;

use crate::api::OcrWithImageResponse;
use crate::config::EngineConfig;
use crate::vision::ocr::OcrResult;
use crate::vision::{probe_image, select_engine, EngineBackends, EngineSelection};

/// Arguments for the recognize command
#[derive(Args, Debug)]
pub struct RecognizeArgs {
    /// Image file to recognize
    pub path: PathBuf,

    /// Print the full JSON result instead of the text
    #[arg(long)]
    pub json: bool,

    /// Include image dimensions and format (implies --json)
    #[arg(long)]
    pub with_image_info: bool,
}

/// Output printed by the recognize command
#[derive(Debug)]
pub enum RecognizeOutput {
    Text(String),
    Json(serde_json::Value),
}

impl RecognizeOutput {
    pub fn render(&self) -> Result<String> {
        match self {
            RecognizeOutput::Text(text) => Ok(text.clone()),
            RecognizeOutput::Json(value) => Ok(serde_json::to_string_pretty(value)?),
        }
    }
}

/// Recognize `args.path` with an already resolved engine
pub async fn run_recognize(
    selection: &EngineSelection,
    args: &RecognizeArgs,
) -> Result<RecognizeOutput> {
    let result: OcrResult = selection
        .adapter()
        .recognize(&args.path)
        .await
        .with_context(|| format!("failed to recognize {}", args.path.display()))?;

    info!(
        "Recognized {} blocks in {}",
        result.text_blocks().len(),
        args.path.display()
    );

    if args.with_image_info {
        let bytes = tokio::fs::read(&args.path)
            .await
            .with_context(|| format!("failed to read {}", args.path.display()))?;
        let image_info = probe_image(&bytes)?;
        let response = OcrWithImageResponse::new(result, image_info);
        return Ok(RecognizeOutput::Json(serde_json::to_value(response)?));
    }

    if args.json {
        Ok(RecognizeOutput::Json(serde_json::to_value(&result)?))
    } else {
        Ok(RecognizeOutput::Text(result.full_text().to_string()))
    }
}

pub async fn recognize_file(engines: &EngineConfig, args: RecognizeArgs) -> Result<()> {
    let selection = select_engine(&engines.engine, EngineBackends::from_config(engines));
    let output = run_recognize(&selection, &args).await?;
    println!("{}", output.render()?);
    Ok(())
}

/// Print the resolved engine
pub fn show_engine(engines: &EngineConfig) -> Result<()> {
    let selection = select_engine(&engines.engine, EngineBackends::from_config(engines));
    println!("{}", describe_selection(&selection));
    Ok(())
}

pub fn describe_selection(selection: &EngineSelection) -> String {
    let mut lines = vec![
        format!("Requested:  {}", selection.requested_id()),
        format!("Active:     {}", selection.active().id()),
        format!("Name:       {}", selection.display_name()),
        format!("Scheduling: {}", selection.scheduling()),
    ];
    if let Some(note) = selection.note() {
        lines.push(format!("Note:       {}", note));
    }
    lines.join("\n")
}

// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! External runner processes for the OCR engines
//!
//! Each engine is reached through a small program that takes an image path as
//! its last argument and prints the engine's native result as JSON on stdout.
//! The same program answers `--check` with exit status 0 when the engine
//! library can be loaded.

use std::io;
use std::path::Path;
use std::process::Output;

use serde::de::DeserializeOwned;
use tracing::debug;

use super::engine::{EngineError, EngineKind};

/// Flag asking a runner whether its engine can be loaded
const PROBE_FLAG: &str = "--check";

/// Longest stderr excerpt carried into an error message
const MAX_STDERR_CHARS: usize = 2000;

/// A runner program plus its fixed leading arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerCommand {
    engine: EngineKind,
    program: String,
    args: Vec<String>,
}

impl RunnerCommand {
    pub fn new(engine: EngineKind, program: impl Into<String>) -> Self {
        Self {
            engine,
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Ask the runner whether the engine can be loaded
    pub fn probe(&self) -> Result<(), EngineError> {
        debug!("Probing {} runner '{}'", self.engine, self.program);

        let output = std::process::Command::new(&self.program)
            .args(&self.args)
            .arg(PROBE_FLAG)
            .output()
            .map_err(|e| self.spawn_error(e))?;

        if output.status.success() {
            Ok(())
        } else {
            Err(EngineError::unavailable(
                self.engine,
                failure_message(&self.program, &output),
            ))
        }
    }

    /// Run the engine on an image, blocking the calling thread
    pub fn run_blocking(&self, image_path: &Path) -> Result<Vec<u8>, EngineError> {
        debug!("Running {} on {}", self.engine, image_path.display());

        let output = std::process::Command::new(&self.program)
            .args(&self.args)
            .arg(image_path)
            .output()
            .map_err(|e| self.spawn_error(e))?;

        self.check_output(output)
    }

    /// Run the engine on an image, yielding while the child process works
    pub async fn run(&self, image_path: &Path) -> Result<Vec<u8>, EngineError> {
        debug!("Running {} on {}", self.engine, image_path.display());

        let output = tokio::process::Command::new(&self.program)
            .args(&self.args)
            .arg(image_path)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;

        self.check_output(output)
    }

    /// Decode the runner's JSON stdout into the engine's native type
    pub fn parse<T: DeserializeOwned>(&self, stdout: &[u8]) -> Result<T, EngineError> {
        serde_json::from_slice(stdout).map_err(|e| {
            EngineError::processing(self.engine, format!("invalid engine output: {}", e))
        })
    }

    fn check_output(&self, output: Output) -> Result<Vec<u8>, EngineError> {
        if output.status.success() {
            Ok(output.stdout)
        } else {
            Err(EngineError::processing(
                self.engine,
                failure_message(&self.program, &output),
            ))
        }
    }

    fn spawn_error(&self, err: io::Error) -> EngineError {
        match err.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => EngineError::unavailable(
                self.engine,
                format!("cannot launch '{}': {}", self.program, err),
            ),
            _ => EngineError::processing(
                self.engine,
                format!("failed to run '{}': {}", self.program, err),
            ),
        }
    }
}

fn failure_message(program: &str, output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();

    if stderr.is_empty() {
        return format!("'{}' exited with {}", program, output.status);
    }

    // Python tracebacks end with the interesting line
    let excerpt = if stderr.chars().count() > MAX_STDERR_CHARS {
        let skip = stderr.chars().count() - MAX_STDERR_CHARS;
        stderr.chars().skip(skip).collect::<String>()
    } else {
        stderr.to_string()
    };

    format!("'{}' exited with {}: {}", program, output.status, excerpt)
}

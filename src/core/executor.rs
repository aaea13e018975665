//! Process boundary for the external volume tool.
//!
//! Dispatch only sees the [`ExternalTool`] trait so it can be driven by a
//! scripted fake in tests.

use crate::models::request::Mode;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::Command;
use tracing::{debug, info};

pub trait ExternalTool {
    /// Program name shown in rendered command lines.
    fn program(&self) -> String;

    /// Run the tool with `args` and block until it exits.
    ///
    /// `Ok` carries the exit code; `Err` means the tool could not be run.
    fn execute(&mut self, mode: Mode, args: &[String]) -> Result<i32>;
}

/// Runs the real binary with the terminal attached, so password prompts
/// and progress dialogs reach the user.
#[derive(Debug, Clone)]
pub struct VeraCryptTool {
    binary: PathBuf,
}

impl VeraCryptTool {
    pub fn new(binary: PathBuf) -> Self {
        Self { binary }
    }
}

impl ExternalTool for VeraCryptTool {
    fn program(&self) -> String {
        self.binary.display().to_string()
    }

    fn execute(&mut self, mode: Mode, args: &[String]) -> Result<i32> {
        debug!(binary = %self.binary.display(), %mode, ?args, "spawning external tool");
        let status = Command::new(&self.binary)
            .args(args)
            .status()
            .with_context(|| format!("run {}", self.binary.display()))?;
        // Killed by a signal: no code, count it as a failure.
        let code = status.code().unwrap_or(-1);
        info!(binary = %self.binary.display(), %mode, code, "external tool exited");
        Ok(code)
    }
}

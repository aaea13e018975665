//! Typed errors for the configuration and resolution stages.
//!
//! Execution-stage failures are not errors here: they become per-profile
//! `Failure` outcomes so one broken container never aborts the run.

use crate::constants;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// A single validation problem found in the configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub section: Option<String>,
    pub field: Option<String>,
    pub line: Option<usize>,
    pub message: String,
}

impl ConfigIssue {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            section: None,
            field: None,
            line: None,
            message: message.into(),
        }
    }

    pub fn in_section(mut self, section: &str) -> Self {
        self.section = Some(section.to_string());
        self
    }

    pub fn on_field(mut self, field: &str) -> Self {
        self.field = Some(field.to_string());
        self
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(line) = self.line {
            write!(f, "line {}: ", line)?;
        }
        if let Some(section) = &self.section {
            write!(f, "section \"{}\": ", section)?;
        }
        if let Some(field) = &self.field {
            write!(f, "option \"{}\": ", field)?;
        }
        write!(f, "{}", self.message)
    }
}

#[derive(Error, Debug)]
pub enum MounterError {
    #[error("configuration file not found: {} (run with --init to create one)", .path.display())]
    ConfigMissing { path: PathBuf },

    #[error("invalid configuration:\n{}", format_issues(.0))]
    ConfigInvalid(Vec<ConfigIssue>),

    #[error("unknown profile(s): {}", .0.join(", "))]
    UnknownProfile(Vec<String>),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl MounterError {
    /// Process exit code reported for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::ConfigMissing { .. } | Self::ConfigInvalid(_) => constants::EXIT_CONFIG_ERROR,
            Self::UnknownProfile(_) | Self::InvalidRequest(_) => constants::EXIT_REQUEST_ERROR,
        }
    }

    /// Sections named by a `ConfigInvalid` error, deduplicated in report order.
    pub fn invalid_sections(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        if let Self::ConfigInvalid(issues) = self {
            for section in issues.iter().filter_map(|i| i.section.as_deref()) {
                if !out.contains(&section) {
                    out.push(section);
                }
            }
        }
        out
    }
}

fn format_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(|i| format!("  - {}", i))
        .collect::<Vec<_>>()
        .join("\n")
}

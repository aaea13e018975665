//! What the caller asked for: request kind, mode, and the resolved unit of work.

use crate::models::profile::Profile;
use serde::Serialize;
use std::fmt;

/// The positional arguments, classified before any lookup happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestKind {
    /// List configured profile names instead of dispatching.
    Show,
    /// Every configured profile, in configuration order.
    All,
    /// Explicit names, in caller order, duplicates preserved.
    Named(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Mount,
    Dismount,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Mount => f.write_str("mount"),
            Mode::Dismount => f.write_str("dismount"),
        }
    }
}

/// Built once per invocation, consumed by the dispatcher.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub profiles: Vec<Profile>,
    pub mode: Mode,
    pub dry_run: bool,
}

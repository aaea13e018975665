//! Profile-driven mounting of VeraCrypt containers.
//!
//! Resolves named container profiles from an INI-style configuration into
//! VeraCrypt command lines, then runs (or just prints) them in order.
//!
//! ## Modules
//! - `cli` — Command-line surface and report output
//! - `core` — Config store, resolver, synthesizer, dispatch
//! - `models` — Data structures
//! - `util` — Filesystem and logging helpers

pub mod cli;
pub mod constants;
pub mod core;
pub mod error;
pub mod models;
pub mod util;

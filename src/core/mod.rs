//! Core engine modules.

pub mod bootstrap;
pub mod config_store;
pub mod dispatch;
pub mod executor;
pub mod paths;
pub mod resolver;
pub mod synth;

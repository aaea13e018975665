//! Data structures shared by the engine and the CLI.

pub mod profile;
pub mod request;

//! Container profile model.

use crate::constants;
use serde::Serialize;
use std::fmt;

/// Case-sensitive profile identifier. Never one of the reserved request words.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProfileName(String);

impl ProfileName {
    pub fn parse(name: &str) -> Result<Self, String> {
        if name.trim().is_empty() {
            return Err("profile name cannot be empty".to_string());
        }
        if constants::RESERVED_NAMES.contains(&name) {
            return Err(format!("\"{}\" is reserved and cannot be a profile name", name));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProfileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One fully validated container entry. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub name: ProfileName,
    pub volume_path: String,
    pub try_empty_password: bool,
    /// Keyfile or directory of keyfiles; empty when the volume has none.
    pub keyfiles_path: String,
    pub drive_letter: char,
    pub no_wait_dialog: bool,
    pub save_history: bool,
    pub secure_desktop: bool,
}

impl Profile {
    pub fn has_keyfiles(&self) -> bool {
        !self.keyfiles_path.is_empty()
    }
}

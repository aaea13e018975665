//! Tool root and configuration path resolution.

use crate::constants;
use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct MounterPaths {
    pub root: PathBuf,
    /// Indirection file pointing at the configuration.
    pub path_conf: PathBuf,
    /// Effective configuration file.
    pub config: PathBuf,
}

impl MounterPaths {
    /// Resolve paths from CLI args, env vars, or the current directory.
    ///
    /// An explicit config path wins; otherwise `path.conf` under the root is
    /// consulted, falling back to `<root>/mount.ini`.
    pub fn resolve(root_arg: Option<PathBuf>, config_arg: Option<PathBuf>) -> Result<Self> {
        let root = match root_arg {
            Some(root) => root,
            None => match env::var_os("VC_MOUNTER_ROOT") {
                Some(root) => PathBuf::from(root),
                None => env::current_dir().context("resolve current directory")?,
            },
        };
        let mut paths = Self::from_root(root);
        if let Some(config) = config_arg {
            paths.config = paths.absolutize(&config);
        } else if let Some(config) = read_path_conf(&paths.path_conf)? {
            paths.config = paths.absolutize(&config);
        }
        debug!(
            root = %paths.root.display(),
            config = %paths.config.display(),
            "resolved paths"
        );
        Ok(paths)
    }

    /// Paths under a root directory, ignoring any indirection file.
    pub fn from_root(root: PathBuf) -> Self {
        let path_conf = root.join(constants::PATH_CONFIG_FILE);
        let config = root.join(constants::CONFIG_FILE);
        Self {
            root,
            path_conf,
            config,
        }
    }

    fn absolutize(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

/// Read the indirection file. `None` when it is absent or blank.
pub fn read_path_conf(path: &Path) -> Result<Option<PathBuf>> {
    if !path.is_file() {
        return Ok(None);
    }
    let content =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Ok(Some(PathBuf::from(trimmed)))
}

impl std::fmt::Display for MounterPaths {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.config.display())
    }
}

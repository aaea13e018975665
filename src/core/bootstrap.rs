//! First-run scaffolding: indirection file and configuration template.
//!
//! Never overwrites existing files and never touches container or keyfile
//! paths named in the configuration.

use crate::constants;
use crate::core::paths::MounterPaths;
use crate::util::fs as mounter_fs;
use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

/// Files written by [`init`]. Empty when everything already existed.
#[derive(Debug, Default)]
pub struct InitReport {
    pub created: Vec<PathBuf>,
}

pub fn init(paths: &MounterPaths) -> Result<InitReport> {
    let mut report = InitReport::default();

    if !paths.path_conf.exists() {
        mounter_fs::write_atomic(&paths.path_conf, &format!("{}\n", constants::CONFIG_FILE))?;
        info!(path = %paths.path_conf.display(), "created path config");
        report.created.push(paths.path_conf.clone());
    }

    if !paths.config.exists() {
        mounter_fs::write_atomic(&paths.config, &template())?;
        info!(path = %paths.config.display(), "created configuration template");
        report.created.push(paths.config.clone());
    }

    Ok(report)
}

/// One section listing every required option with an empty value.
pub fn template() -> String {
    let mut out = String::from(
        "# One [section] per container. Booleans are yes/no; keyfiles may stay empty.\n",
    );
    out.push_str(&format!("[{}]\n", constants::TEMPLATE_SECTION));
    for key in constants::PROFILE_KEYS {
        out.push_str(&format!("{} = \n", key));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config_store;
    use crate::error::MounterError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_both_files() {
        let dir = TempDir::new().unwrap();
        let paths = MounterPaths::from_root(dir.path().to_path_buf());
        let report = init(&paths).unwrap();
        assert_eq!(report.created.len(), 2);
        assert_eq!(fs::read_to_string(&paths.path_conf).unwrap().trim(), "mount.ini");
        assert!(paths.config.is_file());
    }

    #[test]
    fn test_init_never_overwrites() {
        let dir = TempDir::new().unwrap();
        let paths = MounterPaths::from_root(dir.path().to_path_buf());
        fs::write(&paths.config, "[Mine]\n").unwrap();
        fs::write(&paths.path_conf, "mount.ini").unwrap();
        let report = init(&paths).unwrap();
        assert!(report.created.is_empty());
        assert_eq!(fs::read_to_string(&paths.config).unwrap(), "[Mine]\n");
    }

    #[test]
    fn test_template_lists_every_key_and_needs_editing() {
        let t = template();
        for key in constants::PROFILE_KEYS {
            assert!(t.contains(&format!("{} = ", key)));
        }
        // Empty values must be filled in before the profile is usable.
        let err = config_store::load_from_str(&t).unwrap_err();
        assert_eq!(err.invalid_sections(), vec![constants::TEMPLATE_SECTION]);
        assert!(matches!(err, MounterError::ConfigInvalid(_)));
    }
}

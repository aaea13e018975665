//! Command-line surface and dispatch wiring.

use crate::constants;
use crate::core::dispatch;
use crate::core::executor::{ExternalTool, VeraCryptTool};
use crate::core::paths::MounterPaths;
use crate::core::resolver::{self, Resolution};
use crate::core::{bootstrap, config_store};
use crate::error::MounterError;
use crate::models::request::{Mode, RequestSpec};
use anyhow::{bail, Result};
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use tracing::debug;

pub mod report;

const AFTER_HELP: &str = "\
Examples:
  vc-mounter all        Mount all configured containers
  vc-mounter all -d     Dismount all configured containers
  vc-mounter show       List configured containers
  vc-mounter Cont1 Cont2
                        Mount two of the configured containers";

#[derive(Parser, Debug)]
#[command(
    name = "vc-mounter",
    version,
    about = "Mount and dismount VeraCrypt containers from named profiles",
    after_help = AFTER_HELP
)]
pub struct Cli {
    /// Profile names, or the single word `all` or `show`
    #[arg(value_name = "CONTAINER", required_unless_present = "init")]
    pub names: Vec<String>,

    /// Dismount instead of mount
    #[arg(short = 'd', long)]
    pub dismount: bool,

    /// Print the commands without running VeraCrypt
    #[arg(short = 'x', long = "dry")]
    pub dry_run: bool,

    /// Create path.conf and a configuration template if missing
    #[arg(long)]
    pub init: bool,

    /// Directory holding path.conf (default: current directory)
    #[arg(long, value_name = "PATH")]
    pub root: Option<PathBuf>,

    /// Configuration file, bypassing path.conf
    #[arg(long, value_name = "PATH", env = "VC_MOUNTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// VeraCrypt binary
    #[arg(
        long,
        value_name = "PATH",
        env = "VC_MOUNTER_VERACRYPT",
        default_value = constants::DEFAULT_VERACRYPT_BIN
    )]
    pub veracrypt: PathBuf,

    /// Output format (text|json)
    #[arg(long, default_value = "text")]
    pub format: String,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.dismount {
            Mode::Dismount
        } else {
            Mode::Mount
        }
    }

    /// Run the command and return the process exit code.
    pub fn run(self) -> Result<u8> {
        if self.format != "text" && self.format != "json" {
            bail!("invalid format: {} (use text|json)", self.format);
        }
        let json = self.format == "json";
        let paths = MounterPaths::resolve(self.root.clone(), self.config.clone())?;

        if self.init {
            let created = bootstrap::init(&paths)?;
            report::print_init(&paths, &created);
            if self.names.is_empty() {
                return Ok(constants::EXIT_OK);
            }
        }

        let request = resolver::parse_request(&self.names)?;
        let store = config_store::load(&paths.config)?;

        match resolver::resolve(&request, &store)? {
            Resolution::Show(names) => {
                report::print_show(&names, json)?;
                Ok(constants::EXIT_OK)
            }
            Resolution::Profiles(profiles) => {
                let spec = RequestSpec {
                    profiles,
                    mode: self.mode(),
                    dry_run: self.dry_run,
                };
                debug!(
                    count = spec.profiles.len(),
                    mode = %spec.mode,
                    dry_run = spec.dry_run,
                    "dispatching"
                );
                let mut tool = VeraCryptTool::new(self.veracrypt);
                let run_report = dispatch::run(&spec, &mut tool);
                report::print_run(&run_report, &tool.program(), json)?;
                if run_report.succeeded() {
                    Ok(constants::EXIT_OK)
                } else {
                    Ok(constants::EXIT_EXECUTION_FAILED)
                }
            }
        }
    }
}

/// Exit code for an error that aborted the run.
pub fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<MounterError>()
        .map(MounterError::exit_code)
        .unwrap_or(constants::EXIT_EXECUTION_FAILED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("vc-mounter").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_flags() {
        let cli = parse(&["Foo", "Bar", "-d", "-x"]);
        assert_eq!(cli.names, vec!["Foo", "Bar"]);
        assert_eq!(cli.mode(), Mode::Dismount);
        assert!(cli.dry_run);

        let cli = parse(&["all", "--dismount", "--dry"]);
        assert_eq!(cli.mode(), Mode::Dismount);
        assert!(cli.dry_run);

        assert_eq!(parse(&["Foo"]).mode(), Mode::Mount);
    }

    #[test]
    fn test_names_required_without_init() {
        assert!(Cli::try_parse_from(["vc-mounter"]).is_err());
        assert!(Cli::try_parse_from(["vc-mounter", "--init"]).is_ok());
    }

    #[test]
    fn test_exit_code_for_typed_errors() {
        let err = anyhow::Error::from(MounterError::UnknownProfile(vec!["Ghost".into()]));
        assert_eq!(exit_code_for(&err), constants::EXIT_REQUEST_ERROR);
        let err = anyhow::anyhow!("something else");
        assert_eq!(exit_code_for(&err), constants::EXIT_EXECUTION_FAILED);
    }

    #[test]
    fn test_run_missing_config() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_str().unwrap();
        let err = parse(&["all", "--root", root]).run().unwrap_err();
        assert_eq!(exit_code_for(&err), constants::EXIT_CONFIG_ERROR);
    }

    #[test]
    fn test_run_init_then_show_reports_template() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_str().unwrap();
        assert_eq!(parse(&["--init", "--root", root]).run().unwrap(), constants::EXIT_OK);
        assert!(dir.path().join("mount.ini").is_file());
        // The template has empty values and must be edited first.
        let err = parse(&["show", "--root", root]).run().unwrap_err();
        assert_eq!(exit_code_for(&err), constants::EXIT_CONFIG_ERROR);
    }

    #[test]
    fn test_run_dry_all_succeeds_without_binary() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("mount.ini"),
            "[Foo]\nvolume = /v/foo.img\ntryemptypass = no\nkeyfiles =\ndriveletter = f\nnowaitdlg = no\nsavehistory = no\nsecuredesktop = no\n",
        )
        .unwrap();
        let root = dir.path().to_str().unwrap();
        let code = parse(&["all", "-x", "--root", root, "--veracrypt", "/nonexistent/vc"])
            .run()
            .unwrap();
        assert_eq!(code, constants::EXIT_OK);
        let code = parse(&["Foo", "--root", root, "--veracrypt", "/nonexistent/vc"])
            .run()
            .unwrap();
        assert_eq!(code, constants::EXIT_EXECUTION_FAILED);
    }

    #[test]
    fn test_run_rejects_bad_format() {
        assert!(parse(&["all", "--format", "yaml"]).run().is_err());
    }
}

use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = vc_mounter::cli::Cli::parse();
    if let Err(err) = vc_mounter::util::logging::init(cli.verbose) {
        eprintln!("warning: {:#}", err);
    }
    match cli.run() {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::from(vc_mounter::cli::exit_code_for(&err))
        }
    }
}

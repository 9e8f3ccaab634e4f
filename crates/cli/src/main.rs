use std::process::ExitCode;

use clap::Parser;
use log::Level;

mod commands;
mod sink;

use commands::ScanArgs;
use triage_runtime::{PROGRAM_NAME, logging};

#[derive(Debug, Parser)]
#[command(
    name = PROGRAM_NAME,
    version,
    about = "Fingerprint directory trees into incident case batches"
)]
pub struct Cli {
    #[command(flatten)]
    pub args: ScanArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.args.quiet {
        Level::Warn
    } else if cli.args.verbose {
        Level::Debug
    } else {
        Level::Info
    };
    logging::init_with_default(default_level).ok();

    commands::scan::run(cli.args)
}

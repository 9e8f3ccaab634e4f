use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Result, bail};
use clap::Args;
use log::error;
use regex::Regex;

use triage_engine::{ScanConfig, ScanSummary, scan};
use triage_protocol::CaseSink;

use crate::sink::{SpoolSink, TableSink};

#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Directory tree to fingerprint recursively
    #[arg(short = 'f', long, default_value = ".")]
    pub root: PathBuf,

    /// Only entries whose full path matches this regex are evaluated
    #[arg(long)]
    pub regex: Option<String>,

    /// Stop traversal after this many fingerprinted files
    #[arg(long)]
    pub limit: Option<usize>,

    /// Directory where case batches are spooled as JSON entries
    /// (required unless --dry-run)
    #[arg(short = 'o', long)]
    pub out: Option<PathBuf>,

    /// Iterate and print batches without persisting anything
    #[arg(long)]
    pub dry_run: bool,

    /// Log every fingerprinted file
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    pub quiet: bool,
}

pub fn run(args: ScanArgs) -> ExitCode {
    match execute(args) {
        Ok(code) => code,
        Err(e) => {
            error!("[error] {e}");
            eprintln!("[scan] {e}");
            ExitCode::from(2)
        }
    }
}

fn execute(args: ScanArgs) -> Result<ExitCode> {
    let cfg = build_config(&args)?;
    let mut sink = build_sink(&args)?;

    let summary = scan::run(&cfg, sink.as_mut())?;
    report(&summary);

    Ok(ExitCode::SUCCESS)
}

/// Validate flags into the immutable run configuration. Everything that
/// can fail here fails before the traversal starts.
fn build_config(args: &ScanArgs) -> Result<ScanConfig> {
    let filter = match &args.regex {
        Some(pattern) => match Regex::new(pattern) {
            Ok(re) => Some(re),
            Err(e) => bail!("invalid regex - {e}"),
        },
        None => None,
    };

    Ok(ScanConfig {
        root: args.root.clone(),
        filter,
        limit: args.limit,
    })
}

fn build_sink(args: &ScanArgs) -> Result<Box<dyn CaseSink>> {
    if args.dry_run {
        return Ok(Box::new(TableSink::stdout()));
    }
    match &args.out {
        Some(dir) => Ok(Box::new(SpoolSink::new(dir.clone()))),
        None => bail!("please provide the spool directory (--out), or use --dry-run"),
    }
}

fn report(summary: &ScanSummary) {
    eprintln!(
        "[scan] {} files, {} directories, {} batches delivered",
        summary.files, summary.directories, summary.batches
    );
    if summary.limit_hit {
        eprintln!("[scan] file limit reached; traversal stopped early");
    }
}

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;

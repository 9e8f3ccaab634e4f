//! One-shot scan: walk, fingerprint, batch, deliver.
//!
//! Batches are grouped per top-level directory of the traversal root.
//! A directory entry at any depth flushes everything accumulated so far
//! (its own record included) into the case named by its top-level path
//! component, so files still pending at a top-level boundary travel
//! with the next directory's batch. Consumers rely on that grouping;
//! do not "fix" it here.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use regex::Regex;
use thiserror::Error;

use triage_fs::{EntryMeta, WalkContext, walk};
use triage_protocol::{CaseId, CaseSink, EntryFormat, FingerprintRecord, SinkError};

use crate::fingerprint::fingerprint;

/// Immutable per-run settings, built once at startup.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Tree to traverse.
    pub root: PathBuf,
    /// Optional filter over full entry paths.
    pub filter: Option<Regex>,
    /// Stop traversal after this many fingerprinted files.
    pub limit: Option<usize>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanSummary {
    pub files: usize,
    pub directories: usize,
    pub batches: usize,
    /// The file limit stopped traversal early; pending work was still
    /// flushed.
    pub limit_hit: bool,
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("file limit of {0} reached")]
    LimitReached(usize),
    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Walk `cfg.root` and deliver fingerprint batches to `sink`.
///
/// Sink failures abort the remaining traversal; whatever had
/// accumulated by then is still offered to the sink before returning.
pub fn run(cfg: &ScanConfig, sink: &mut dyn CaseSink) -> Result<ScanSummary, ScanError> {
    let ctx = WalkContext {
        filter: cfg.filter.clone(),
    };
    let mut scanner = Scanner {
        cfg,
        sink,
        batch: Vec::new(),
        case: None,
        summary: ScanSummary::default(),
    };

    let walk_err = walk(&cfg.root, &ctx, |meta| scanner.visit(&meta)).err();

    let limit_stop = match walk_err {
        None => false,
        Some(ScanError::LimitReached(n)) => {
            warn!("stopping traversal of {}: file limit of {n} reached", cfg.root.display());
            true
        }
        Some(e) => {
            // Deliver what we already have before surfacing the error.
            if let Err(flush_err) = scanner.flush_remainder() {
                warn!("could not deliver final batch: {flush_err}");
            }
            return Err(e);
        }
    };

    scanner.flush_remainder()?;
    let mut summary = scanner.summary;
    summary.limit_hit = limit_stop;
    Ok(summary)
}

struct Scanner<'a> {
    cfg: &'a ScanConfig,
    sink: &'a mut dyn CaseSink,
    batch: Vec<FingerprintRecord>,
    case: Option<(CaseId, String)>,
    summary: ScanSummary,
}

impl Scanner<'_> {
    fn visit(&mut self, meta: &EntryMeta) -> Result<(), ScanError> {
        let record = fingerprint(meta);
        debug!("{record}");
        self.batch.push(record);

        if meta.is_dir {
            info!("{}", meta.full_path.display());
            self.summary.directories += 1;
            let name = top_level_name(&self.cfg.root, &meta.full_path);
            self.flush_into(&name)?;
        } else {
            self.summary.files += 1;
            if let Some(limit) = self.cfg.limit
                && limit > 0
                && self.summary.files >= limit
            {
                return Err(ScanError::LimitReached(limit));
            }
        }

        Ok(())
    }

    /// Deliver the accumulated batch to the named case, opening or
    /// switching the case first when needed.
    fn flush_into(&mut self, name: &str) -> Result<(), SinkError> {
        if self.batch.is_empty() {
            return Ok(());
        }

        let switch = match &self.case {
            Some((_, open_name)) => open_name != name,
            None => true,
        };
        if switch {
            let id = self.sink.open_case(name)?;
            self.case = Some((id, name.to_owned()));
        }

        // The batch is only cleared once delivered; a failed append
        // leaves it pending so the final flush can retry it.
        let (id, _) = self.case.as_ref().expect("case opened above");
        self.sink.append_entry(id, &self.batch, EntryFormat::Table)?;
        self.batch.clear();
        self.summary.batches += 1;
        Ok(())
    }

    /// Flush whatever is left after the walk. With no case open yet the
    /// remainder is filed under its own top-level component.
    fn flush_remainder(&mut self) -> Result<(), SinkError> {
        if self.batch.is_empty() {
            return Ok(());
        }
        let name = match &self.case {
            Some((_, open_name)) => open_name.clone(),
            None => top_level_name(&self.cfg.root, Path::new(&self.batch[0].path)),
        };
        self.flush_into(&name)
    }
}

/// First path component below the traversal root; names the case an
/// entry belongs to.
fn top_level_name(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .ok()
        .and_then(|rel| rel.components().next())
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;

//! Local `CaseSink` implementations. The remote incident-management
//! uploader consumes what these produce; it is not part of this tool.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use triage_protocol::{CaseId, CaseSink, EntryFormat, FingerprintRecord, SinkError, table};

/// Dry-run sink: renders every batch as a table on the given writer.
#[derive(Debug)]
pub struct TableSink<W: Write> {
    out: W,
}

impl<W: Write> TableSink<W> {
    pub fn new(out: W) -> Self {
        TableSink { out }
    }
}

impl TableSink<io::Stdout> {
    pub fn stdout() -> Self {
        TableSink::new(io::stdout())
    }
}

impl<W: Write + std::fmt::Debug> CaseSink for TableSink<W> {
    fn open_case(&mut self, name: &str) -> Result<CaseId, SinkError> {
        writeln!(self.out, "=== case {name}").map_err(|source| SinkError::OpenCase {
            name: name.to_owned(),
            source,
        })?;
        Ok(CaseId(name.to_owned()))
    }

    fn append_entry(
        &mut self,
        case: &CaseId,
        records: &[FingerprintRecord],
        _format: EntryFormat,
    ) -> Result<(), SinkError> {
        write!(self.out, "{}", table::render(records)).map_err(|source| {
            SinkError::AppendEntry {
                case: case.0.clone(),
                source,
            }
        })
    }
}

/// Spool sink: one directory per case, one JSON file per delivered
/// entry, numbered in delivery order.
#[derive(Debug)]
pub struct SpoolSink {
    root: PathBuf,
    sequence: HashMap<String, usize>,
}

impl SpoolSink {
    pub fn new(root: PathBuf) -> Self {
        SpoolSink {
            root,
            sequence: HashMap::new(),
        }
    }

    fn case_dir(&self, case: &str) -> PathBuf {
        // Case names are single path components; an empty one still
        // needs a directory.
        let dir = if case.is_empty() { "unnamed" } else { case };
        self.root.join(dir)
    }
}

impl CaseSink for SpoolSink {
    fn open_case(&mut self, name: &str) -> Result<CaseId, SinkError> {
        fs::create_dir_all(self.case_dir(name)).map_err(|source| SinkError::OpenCase {
            name: name.to_owned(),
            source,
        })?;
        Ok(CaseId(name.to_owned()))
    }

    fn append_entry(
        &mut self,
        case: &CaseId,
        records: &[FingerprintRecord],
        format: EntryFormat,
    ) -> Result<(), SinkError> {
        let seq = self.sequence.entry(case.0.clone()).or_insert(0);
        *seq += 1;
        let seq = *seq;
        let path = self.case_dir(&case.0).join(format!("entry-{seq:04}.json"));

        let entry = serde_json::json!({
            "format": format.as_str(),
            "contents": records,
        });
        let body = serde_json::to_string_pretty(&entry).map_err(|e| SinkError::AppendEntry {
            case: case.0.clone(),
            source: io::Error::other(e),
        })?;

        fs::write(&path, body).map_err(|source| SinkError::AppendEntry {
            case: case.0.clone(),
            source,
        })
    }
}

#[cfg(test)]
#[path = "sink_tests.rs"]
mod tests;

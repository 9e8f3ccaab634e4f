use std::io;

use thiserror::Error;

use crate::record::FingerprintRecord;

/// Opaque handle for an open case, as issued by a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseId(pub String);

/// Display format tag attached to every delivered entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryFormat {
    Table,
}

impl EntryFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            EntryFormat::Table => "table",
        }
    }
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to open case {name}: {source}")]
    OpenCase { name: String, source: io::Error },
    #[error("failed to append entry to case {case}: {source}")]
    AppendEntry { case: String, source: io::Error },
}

/// Delivery boundary for fingerprint batches.
///
/// The remote incident-management uploader implements this on its side;
/// the binary ships local implementations (stdout table, JSON spool).
/// Batch boundaries are discovered incrementally during traversal, so
/// entries arrive one batch at a time against a named case.
pub trait CaseSink: std::fmt::Debug {
    fn open_case(&mut self, name: &str) -> Result<CaseId, SinkError>;

    fn append_entry(
        &mut self,
        case: &CaseId,
        records: &[FingerprintRecord],
        format: EntryFormat,
    ) -> Result<(), SinkError>;
}

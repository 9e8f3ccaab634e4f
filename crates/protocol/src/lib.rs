mod record;
mod sink;
pub mod table;

pub use record::{EntryKind, FingerprintRecord};
pub use sink::{CaseId, CaseSink, EntryFormat, SinkError};

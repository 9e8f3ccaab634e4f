mod fingerprint;
mod multiplex;
pub mod scan;
pub mod spamsum;

pub use fingerprint::fingerprint;
pub use multiplex::{Accumulator, ByteSink, DigestKind, DigestSet};
pub use scan::{ScanConfig, ScanError, ScanSummary};

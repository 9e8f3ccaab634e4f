mod record;
mod walker;

pub use record::EntryMeta;
pub use walker::{WalkContext, walk};

//! Assembly of one `FingerprintRecord` from one traversed entry.

use std::fs::File;
use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Local};
use log::warn;

use triage_fs::EntryMeta;
use triage_protocol::{EntryKind, FingerprintRecord};

use crate::multiplex::{DigestKind, DigestSet, stream_into};
use crate::spamsum;

/// Type label for directories.
const FOLDER_TYPE: &str = "Folder";

/// Fingerprint a single entry. Metadata is always populated; the digest
/// fields are filled only for regular files, and a file that cannot be
/// hashed still yields a (digestless) record.
pub fn fingerprint(meta: &EntryMeta) -> FingerprintRecord {
    let (created, created_str) = stamp(meta.created);
    let (accessed, accessed_str) = stamp(meta.accessed);
    let (modified, modified_str) = stamp(meta.modified);

    let mut record = FingerprintRecord {
        created,
        created_str,
        accessed,
        accessed_str,
        modified,
        modified_str,
        path: meta.full_path.to_string_lossy().into_owned(),
        kind: if meta.is_dir {
            EntryKind::Folder
        } else {
            EntryKind::File
        },
        file_type: type_label(meta),
        size: meta.size,
        mode: meta.mode.clone(),
        md5: String::new(),
        sha1: String::new(),
        sha256: String::new(),
        sha512: String::new(),
        ssdeep: String::new(),
    };

    if meta.is_regular_file() {
        add_hashes(&meta.full_path, meta.size, &mut record);
    }

    record
}

/// Epoch seconds plus a human-readable rendering, both from the same
/// source timestamp.
fn stamp(t: Option<SystemTime>) -> (i64, String) {
    match t {
        Some(t) => {
            let dt = DateTime::<Local>::from(t);
            (dt.timestamp(), dt.format("%Y-%m-%d %H:%M:%S %z").to_string())
        }
        None => (0, String::new()),
    }
}

/// Directories are labeled `Folder`. Files map their extension to a
/// MIME type, falling back to the bare extension (filesystem casing
/// kept) when the table has no entry, or to empty with no extension.
fn type_label(meta: &EntryMeta) -> String {
    if meta.is_dir {
        return FOLDER_TYPE.to_owned();
    }
    match &meta.ext {
        Some(ext) => match mime_guess::from_ext(ext).first_raw() {
            Some(mime) => mime.to_owned(),
            None => ext.clone(),
        },
        None => String::new(),
    }
}

/// One open, two reads: a forward pass feeding every exact digest at
/// once, then the fuzzy hash re-reading from the start. An exact-pass
/// failure leaves all digest fields empty (the fuzzy hash included,
/// since the stream state is unknown); a fuzzy failure leaves the exact
/// digests intact.
fn add_hashes(path: &Path, size: u64, record: &mut FingerprintRecord) {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            warn!("could not compute digests for {}: {e}", path.display());
            return;
        }
    };

    let mut set = DigestSet::standard();
    if let Err(e) = stream_into(&mut file, &mut set) {
        warn!("could not compute digests for {}: {e}", path.display());
        return;
    }

    match spamsum::hash_reader(&mut file, size) {
        Ok(sum) => record.ssdeep = sum.to_string(),
        Err(e) => warn!("could not compute fuzzy hash for {}: {e}", path.display()),
    }

    for (kind, hex) in set.finish() {
        match kind {
            DigestKind::Md5 => record.md5 = hex,
            DigestKind::Sha1 => record.sha1 = hex,
            DigestKind::Sha256 => record.sha256 = hex,
            DigestKind::Sha512 => record.sha512 = hex,
        }
    }
}

#[cfg(test)]
#[path = "fingerprint_tests.rs"]
mod tests;

use std::fmt;

use serde::Serialize;

/// What kind of filesystem object a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Folder,
}

/// One fingerprinted filesystem entry.
///
/// Assembled in full by the engine and never mutated afterwards. The
/// numbered serde tags order the columns the incident-management side
/// renders; the remaining fields are auxiliary metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FingerprintRecord {
    /// Creation time as epoch seconds, 0 when the filesystem has none.
    pub created: i64,
    pub created_str: String,
    pub accessed: i64,
    pub accessed_str: String,
    pub modified: i64,
    pub modified_str: String,
    #[serde(rename = "1. Path")]
    pub path: String,
    pub kind: EntryKind,
    /// MIME type when mapped, bare extension otherwise, "Folder" for
    /// directories, empty when undetermined.
    #[serde(rename = "Type")]
    pub file_type: String,
    #[serde(rename = "2. Size")]
    pub size: u64,
    pub mode: String,
    #[serde(rename = "3. MD5")]
    pub md5: String,
    #[serde(rename = "4. SHA1")]
    pub sha1: String,
    #[serde(rename = "5. SHA256")]
    pub sha256: String,
    #[serde(rename = "6. SHA512")]
    pub sha512: String,
    #[serde(rename = "7. SSDeep")]
    pub ssdeep: String,
}

impl fmt::Display for FingerprintRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - [Created: {}, Accessed: {}, Modified: {}, Size: {}, Mode: {}] - [MD5: {}, SHA1: {}, SHA256: {}, SHA512: {}, SSDEEP: {}]",
            self.path,
            self.created_str,
            self.accessed_str,
            self.modified_str,
            self.size,
            self.mode,
            self.md5,
            self.sha1,
            self.sha256,
            self.sha512,
            self.ssdeep
        )
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
pub(crate) mod tests;

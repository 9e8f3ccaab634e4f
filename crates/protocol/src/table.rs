//! Plain-text table rendering for a batch of fingerprint records.
//!
//! This is the human-readable form of the `table` entry format, used by
//! the dry-run sink. Columns follow the numbered wire tags, then the
//! auxiliary metadata.

use std::fmt::Write as _;

use crate::record::FingerprintRecord;

const HEADERS: [&str; 10] = [
    "Path", "Size", "MD5", "SHA1", "SHA256", "SHA512", "SSDeep", "Type", "Mode", "Modified",
];

fn row(record: &FingerprintRecord) -> [String; 10] {
    [
        record.path.clone(),
        record.size.to_string(),
        record.md5.clone(),
        record.sha1.clone(),
        record.sha256.clone(),
        record.sha512.clone(),
        record.ssdeep.clone(),
        record.file_type.clone(),
        record.mode.clone(),
        record.modified_str.clone(),
    ]
}

/// Render a batch as a pipe-delimited table, one record per line.
pub fn render(records: &[FingerprintRecord]) -> String {
    let rows: Vec<[String; 10]> = records.iter().map(row).collect();

    let mut widths: [usize; 10] = HEADERS.map(str::len);
    for r in &rows {
        for (w, cell) in widths.iter_mut().zip(r.iter()) {
            *w = (*w).max(cell.len());
        }
    }

    let mut out = String::new();
    render_line(&mut out, &HEADERS.map(String::from), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    render_line(&mut out, &rule, &widths);
    for r in &rows {
        render_line(&mut out, r, &widths);
    }
    out
}

fn render_line<S: AsRef<str>>(out: &mut String, cells: &[S], widths: &[usize]) {
    for (cell, &width) in cells.iter().zip(widths) {
        let _ = write!(out, "| {:width$} ", cell.as_ref());
    }
    out.push_str("|\n");
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;

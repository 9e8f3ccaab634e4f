use super::*;
use crate::record::{EntryKind, FingerprintRecord};

fn sample(path: &str, kind: EntryKind) -> FingerprintRecord {
    crate::record::tests::sample(path, kind)
}

#[test]
fn render_includes_headers_and_rows() {
    let mut file = sample("/case/a.txt", EntryKind::File);
    file.md5 = "d41d8cd98f00b204e9800998ecf8427e".to_owned();
    let folder = sample("/case", EntryKind::Folder);

    let table = render(&[folder, file]);
    let lines: Vec<&str> = table.lines().collect();

    // header, rule, two records
    assert_eq!(lines.len(), 4, "got:\n{table}");
    for header in ["Path", "Size", "MD5", "SHA512", "SSDeep", "Mode"] {
        assert!(lines[0].contains(header), "header line missing {header}");
    }
    assert!(lines[1].chars().all(|c| c == '|' || c == '-' || c == ' '));
    assert!(lines[2].contains("/case"), "got:\n{table}");
    assert!(
        lines[3].contains("d41d8cd98f00b204e9800998ecf8427e"),
        "got:\n{table}"
    );
}

#[test]
fn render_of_empty_batch_is_header_only() {
    let table = render(&[]);
    assert_eq!(table.lines().count(), 2);
}

#[test]
fn columns_align_to_widest_cell() {
    let mut file = sample("/case/with/a/much/longer/path/name.bin", EntryKind::File);
    file.sha256 = "a".repeat(64);

    let table = render(&[file]);
    let lines: Vec<&str> = table.lines().collect();
    let pipes = |s: &str| -> Vec<usize> {
        s.char_indices().filter(|(_, c)| *c == '|').map(|(i, _)| i).collect()
    };

    assert_eq!(pipes(lines[0]), pipes(lines[1]), "got:\n{table}");
    assert_eq!(pipes(lines[0]), pipes(lines[2]), "got:\n{table}");
}

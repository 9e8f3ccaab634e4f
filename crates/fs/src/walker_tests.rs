use super::*;

use std::{
    fs::{create_dir, write},
    path::PathBuf,
};

use regex::Regex;

fn collect_paths(root: &std::path::Path, ctx: &WalkContext) -> Vec<PathBuf> {
    let mut visited = Vec::new();
    walk(root, ctx, |meta| {
        visited.push(meta.full_path.clone());
        Ok::<(), ()>(())
    })
    .expect("walk ok");
    visited
}

#[test]
fn visits_in_lexical_pre_order_and_skips_root() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();

    create_dir(root.join("a")).expect("mkdir a");
    write(root.join("a/inner.txt"), b"inner").expect("write inner");
    create_dir(root.join("a/sub")).expect("mkdir a/sub");
    write(root.join("a/sub/deep.txt"), b"deep").expect("write deep");
    write(root.join("b.txt"), b"b").expect("write b");
    create_dir(root.join("c")).expect("mkdir c");

    let visited = collect_paths(root, &WalkContext::default());

    let expected: Vec<PathBuf> = ["a", "a/inner.txt", "a/sub", "a/sub/deep.txt", "b.txt", "c"]
        .iter()
        .map(|p| root.join(p))
        .collect();

    assert_eq!(visited, expected, "directories before contents, sorted");
    assert!(!visited.contains(&root.to_path_buf()), "root is never reported");
}

#[test]
fn filter_limits_reporting_but_still_descends() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();

    create_dir(root.join("evidence")).expect("mkdir");
    write(root.join("evidence/keep.txt"), b"x").expect("write");
    write(root.join("evidence/drop.bin"), b"x").expect("write");

    let ctx = WalkContext {
        filter: Some(Regex::new(r"\.txt$").expect("compile filter")),
    };
    let visited = collect_paths(root, &ctx);

    // The directory itself does not match, but the matching file below
    // it must still be reached.
    assert_eq!(visited, vec![root.join("evidence/keep.txt")]);
}

#[test]
fn visitor_error_aborts_walk() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();

    write(root.join("a.txt"), b"a").expect("write");
    write(root.join("b.txt"), b"b").expect("write");

    let mut seen = 0usize;
    let result = walk(root, &WalkContext::default(), |_meta| {
        seen += 1;
        Err("stop")
    });

    assert_eq!(result, Err("stop"));
    assert_eq!(seen, 1, "no entries visited after the error");
}

#[test]
fn entry_meta_for_regular_file() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();

    write(root.join("report.PDF"), b"hello world").expect("write");

    let visited = {
        let mut metas = Vec::new();
        walk(root, &WalkContext::default(), |meta| {
            metas.push(meta);
            Ok::<(), ()>(())
        })
        .expect("walk ok");
        metas
    };

    assert_eq!(visited.len(), 1);
    let meta = &visited[0];
    assert_eq!(meta.name, "report.PDF");
    assert_eq!(meta.size, 11);
    assert_eq!(meta.ext.as_deref(), Some("PDF"), "extension casing preserved");
    assert!(meta.is_file && meta.is_regular_file());
    assert!(!meta.is_dir && !meta.is_symlink && !meta.is_special);
    assert!(meta.modified.is_some());
}

#[test]
fn entry_meta_for_directory() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();

    create_dir(root.join("sub")).expect("mkdir");

    let visited = {
        let mut metas = Vec::new();
        walk(root, &WalkContext::default(), |meta| {
            metas.push(meta);
            Ok::<(), ()>(())
        })
        .expect("walk ok");
        metas
    };

    let meta = &visited[0];
    assert!(meta.is_dir);
    assert!(!meta.is_regular_file());
    assert_eq!(meta.size, 0, "directory size is not meaningful");
    assert!(meta.mode.starts_with('d'), "mode {:?}", meta.mode);
}

#[cfg(unix)]
#[test]
fn symlinked_directories_are_reported_but_not_descended() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();

    create_dir(root.join("target")).expect("mkdir");
    write(root.join("target/inside.txt"), b"x").expect("write");
    std::os::unix::fs::symlink(root.join("target"), root.join("zlink")).expect("symlink");

    let visited = collect_paths(root, &WalkContext::default());

    assert!(visited.contains(&root.join("zlink")), "link itself reported");
    assert!(
        !visited.contains(&root.join("zlink/inside.txt")),
        "link target contents reached only via the real path"
    );
    // Reached exactly once, through `target`.
    assert_eq!(
        visited.iter().filter(|p| p.ends_with("inside.txt")).count(),
        1
    );
}

#[test]
fn unreadable_root_is_skipped_without_error() {
    let result = walk(
        std::path::Path::new("/nonexistent/triage/walk/root"),
        &WalkContext::default(),
        |_meta| Err("should not be called"),
    );
    assert_eq!(result, Ok(()));
}

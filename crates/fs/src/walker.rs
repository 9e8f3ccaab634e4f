use std::{
    fs::{self, read_dir},
    io,
    path::Path,
};

use log::warn;
use regex::Regex;

use crate::record::{EntryMeta, render_mode};

/// Traversal-wide settings. The filter limits which entries are
/// reported; non-matching directories are still descended so that
/// matching entries deeper down are not lost.
#[derive(Debug, Clone, Default)]
pub struct WalkContext {
    pub filter: Option<Regex>,
}

impl WalkContext {
    fn admits(&self, path: &Path) -> bool {
        match &self.filter {
            Some(re) => re.is_match(&path.to_string_lossy()),
            None => true,
        }
    }
}

/// Sequential depth-first pre-order walk.
///
/// Children are visited in lexical filename order, directories before
/// their contents. The root itself is never reported. Filesystem errors
/// on individual entries are logged and skipped; an `Err` from the
/// visitor aborts the walk and propagates to the caller.
pub fn walk<E>(
    root: &Path,
    ctx: &WalkContext,
    mut visit: impl FnMut(EntryMeta) -> Result<(), E>,
) -> Result<(), E> {
    walk_dir(root, ctx, &mut visit)
}

fn walk_dir<E>(
    dir: &Path,
    ctx: &WalkContext,
    visit: &mut impl FnMut(EntryMeta) -> Result<(), E>,
) -> Result<(), E> {
    let rd = match read_dir(dir) {
        Ok(rd) => rd,
        Err(e) => {
            warn!("[walk] skipping {}: {e}", dir.display());
            return Ok(());
        }
    };

    let mut entries: Vec<fs::DirEntry> = Vec::new();
    for entry_res in rd {
        match entry_res {
            Ok(entry) => entries.push(entry),
            Err(e) => warn!("[walk] error reading entry in {}: {e}", dir.display()),
        }
    }
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let meta = match inspect_entry(&entry) {
            Ok(Some(meta)) => meta,
            Ok(None) => continue,
            Err(e) => {
                warn!("[walk] skipping {}: {e}", entry.path().display());
                continue;
            }
        };

        // Follow lstat semantics: a symlink to a directory is reported
        // but never descended.
        let descend = meta.is_dir && !meta.is_symlink;
        let full_path = meta.full_path.clone();

        if ctx.admits(&full_path) {
            visit(meta)?;
        }
        if descend {
            walk_dir(&full_path, ctx, visit)?;
        }
    }

    Ok(())
}

fn inspect_entry(entry: &fs::DirEntry) -> io::Result<Option<EntryMeta>> {
    let metadata = entry.metadata()?;
    let full_path = entry.path();

    let is_dir = metadata.is_dir();
    let is_symlink = metadata.is_symlink();
    let is_file = metadata.is_file();
    let is_special = !is_dir && !is_symlink && !is_file;

    let name_os = entry.file_name();
    let name = match name_os.to_str() {
        Some(s) => s.to_owned(),
        None => return Ok(None),
    };

    let size = if is_dir { 0 } else { metadata.len() };

    let ext = full_path
        .extension()
        .and_then(|os| os.to_str())
        .map(|s| s.to_owned());

    Ok(Some(EntryMeta {
        mode: render_mode(&metadata),
        created: metadata.created().ok(),
        accessed: metadata.accessed().ok(),
        modified: metadata.modified().ok(),
        full_path,
        name,
        size,
        ext,
        is_dir,
        is_symlink,
        is_file,
        is_special,
    }))
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;

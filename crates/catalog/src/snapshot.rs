//! Filesystem snapshots and rescan deltas.
//!
//! A snapshot is the set of canonical paths of every `.png` file found in
//! one recursive walk of the collection root. The snapshotter retains the
//! previous snapshot across reloads so the caller can ask which files
//! appeared and which disappeared; it knows nothing about identifiers or
//! metadata.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::path::canonical_path;
use crate::types::CanonicalPath;

/// Previous/current snapshot pair over one collection root.
#[derive(Debug, Default)]
pub struct Snapshotter {
    previous: BTreeSet<CanonicalPath>,
    current: BTreeSet<CanonicalPath>,
}

impl Snapshotter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walks `root` and replaces the current snapshot.
    ///
    /// The old current snapshot becomes the previous one. A nonexistent or
    /// unreadable root yields an empty snapshot; unreadable subdirectories
    /// are skipped and the walk continues.
    pub fn reload(&mut self, root: &Path) {
        self.previous = std::mem::take(&mut self.current);
        walk_into(root, root, &mut self.current);
        log::debug!(
            "snapshot reloaded: {} files ({} previously)",
            self.current.len(),
            self.previous.len()
        );
    }

    /// Paths present now but not in the previous snapshot, sorted.
    pub fn files_added(&self) -> Vec<CanonicalPath> {
        self.current.difference(&self.previous).cloned().collect()
    }

    /// Paths present previously but gone now, sorted.
    pub fn files_removed(&self) -> Vec<CanonicalPath> {
        self.previous.difference(&self.current).cloned().collect()
    }

    /// Size of the current snapshot.
    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    pub fn contains(&self, path: &CanonicalPath) -> bool {
        self.current.contains(path)
    }
}

/// Serial recursive walk collecting canonical `.png` paths.
fn walk_into(dir: &Path, root: &Path, out: &mut BTreeSet<CanonicalPath>) {
    let read_dir = match fs::read_dir(dir) {
        Ok(iter) => iter,
        // Can't read this directory, skip it.
        Err(_) => return,
    };

    for entry in read_dir.filter_map(std::result::Result::ok) {
        let path = entry.path();
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if file_type.is_dir() {
            walk_into(&path, root, out);
        } else if is_png(&path) {
            // A file that cannot be canonicalized against the root cannot
            // be catalogued; skip it and keep walking.
            if let Ok(canonical) = canonical_path(&path, root) {
                out.insert(canonical);
            }
        }
    }
}

fn is_png(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
}

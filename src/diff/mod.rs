//! Changed-line sets used to scope issues to new code.
//!
//! Two sources are supported: a unified patch file and the git working
//! tree compared against a revision.

pub mod git;
pub mod patch;

pub use git::changed_lines_from_git;
pub use patch::parse_unified_diff;

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

/// Lines added or modified per file, keyed by path relative to the run root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangedLines {
    files: HashMap<PathBuf, BTreeSet<usize>>,
}

impl ChangedLines {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, file: impl Into<PathBuf>, line: usize) {
        self.files.entry(file.into()).or_default().insert(line);
    }

    /// Whether any line of `from..=to` changed in `file`.
    pub fn intersects(&self, file: &Path, from: usize, to: usize) -> bool {
        self.files
            .get(file)
            .is_some_and(|lines| lines.range(from..=to.max(from)).next().is_some())
    }

    pub fn contains_file(&self, file: &Path) -> bool {
        self.files.contains_key(file)
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn line_count(&self) -> usize {
        self.files.values().map(BTreeSet::len).sum()
    }

    /// Keep only files under `prefix` and make their paths relative to it.
    pub fn rebase(self, prefix: &Path) -> Self {
        if prefix.as_os_str().is_empty() {
            return self;
        }
        let files = self
            .files
            .into_iter()
            .filter_map(|(path, lines)| {
                path.strip_prefix(prefix)
                    .ok()
                    .map(|rel| (rel.to_path_buf(), lines))
            })
            .collect();
        Self { files }
    }
}

use super::{transform_issues, Processor};
use crate::core::Issue;
use crate::errors::Result;
use std::path::{Path, PathBuf};

/// Rewrites absolute issue paths relative to the run root when that is
/// shorter. Must run before any stage that matches or reports by path.
pub struct PathPrettifier {
    root: PathBuf,
}

impl PathPrettifier {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn prettify(&self, path: &Path) -> PathBuf {
        if !path.is_absolute() {
            return path.to_path_buf();
        }
        match pathdiff::diff_paths(path, &self.root) {
            Some(rel) if rel.as_os_str().len() < path.as_os_str().len() => rel,
            _ => path.to_path_buf(),
        }
    }
}

impl Processor for PathPrettifier {
    fn name(&self) -> &str {
        "path_prettifier"
    }

    fn process(&mut self, issues: &[Issue]) -> Result<Vec<Issue>> {
        Ok(transform_issues(issues, |issue| {
            let mut issue = issue.clone();
            issue.pos.filename = self.prettify(&issue.pos.filename);
            issue
        }))
    }

    fn finish(&mut self) {}
}

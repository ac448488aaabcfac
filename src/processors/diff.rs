use super::Processor;
use crate::config::IssuesConfig;
use crate::core::Issue;
use crate::diff::{changed_lines_from_git, parse_unified_diff, ChangedLines};
use crate::errors::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Where changed lines come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffSource {
    /// Diff scoping is off
    None,
    /// A unified patch file
    Patch(PathBuf),
    /// The git working tree compared against a revision, `HEAD` when unset
    Git { revision: Option<String> },
}

impl DiffSource {
    /// A patch file wins over a revision.
    pub fn from_config(issues: &IssuesConfig) -> Self {
        if let Some(patch) = &issues.new_from_patch {
            Self::Patch(patch.clone())
        } else if issues.new_from_rev.is_some() || issues.new {
            Self::Git {
                revision: issues.new_from_rev.clone(),
            }
        } else {
            Self::None
        }
    }
}

/// Keeps only issues touching lines added by the configured diff.
pub struct Diff {
    source: DiffSource,
    root: PathBuf,
    changed: Option<ChangedLines>,
}

impl Diff {
    pub fn new(source: DiffSource, root: impl Into<PathBuf>) -> Self {
        Self {
            source,
            root: root.into(),
            changed: None,
        }
    }

    fn load(&self) -> Result<ChangedLines> {
        match &self.source {
            DiffSource::None => Ok(ChangedLines::new()),
            DiffSource::Patch(path) => {
                let path = if path.is_absolute() {
                    path.clone()
                } else {
                    self.root.join(path)
                };
                let patch = fs::read_to_string(&path)
                    .map_err(|e| Error::file_system("Can't read patch file", &path, e))?;
                parse_unified_diff(&patch)
            }
            DiffSource::Git { revision } => changed_lines_from_git(&self.root, revision.as_deref()),
        }
    }

    fn changed_lines(&mut self) -> Result<&ChangedLines> {
        if self.changed.is_none() {
            let changed = self.load()?;
            log::debug!(
                "Diff has {} changed lines in {} files",
                changed.line_count(),
                changed.file_count()
            );
            self.changed = Some(changed);
        }
        self.changed
            .as_ref()
            .ok_or_else(|| Error::processor("diff", "changed lines unavailable"))
    }
}

impl Processor for Diff {
    fn name(&self) -> &str {
        "diff"
    }

    fn process(&mut self, issues: &[Issue]) -> Result<Vec<Issue>> {
        if self.source == DiffSource::None {
            return Ok(issues.to_vec());
        }

        let root = self.root.clone();
        let changed = self.changed_lines()?;
        Ok(issues
            .iter()
            .filter(|issue| {
                let path = issue.file_path();
                let rel = path.strip_prefix(&root).unwrap_or(path);
                let range = issue.line_range();
                changed.intersects(Path::new(rel), range.from, range.to)
            })
            .cloned()
            .collect())
    }

    fn finish(&mut self) {}
}

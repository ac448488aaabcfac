//! Engine-specific source location normalization.
//!
//! Runs first: every later stage assumes issue paths point into the
//! analyzed tree rather than at tool-specific locations.

use super::{slash_path, Processor};
use crate::config::PathMapping;
use crate::core::Issue;
use crate::errors::Result;
use std::path::{Path, PathBuf};

pub struct LocationNormalizer {
    mappings: Vec<PathMapping>,
    build_cache_dirs: Vec<PathBuf>,
}

impl LocationNormalizer {
    pub fn new(mappings: Vec<PathMapping>, build_cache_dirs: Vec<PathBuf>) -> Self {
        Self {
            mappings,
            build_cache_dirs,
        }
    }

    fn normalize(&self, issue: &Issue) -> PathBuf {
        let raw = slash_path(issue.file_path());
        let raw = raw.strip_prefix("file://").unwrap_or(&raw);

        let mapped = self.mappings.iter().find_map(|m| {
            if m.engine.as_deref().is_some_and(|e| e != issue.from_engine) {
                return None;
            }
            strip_dir_prefix(raw, &m.from).map(|rest| (m, rest))
        });

        match mapped {
            Some((m, rest)) => {
                if m.to.is_empty() {
                    PathBuf::from(rest.trim_start_matches('/'))
                } else {
                    Path::new(&m.to).join(rest.trim_start_matches('/'))
                }
            }
            None => PathBuf::from(raw),
        }
    }

    fn in_build_cache(&self, path: &Path) -> bool {
        self.build_cache_dirs.iter().any(|dir| path.starts_with(dir))
    }
}

/// Strip `prefix` from `path` only at a path component boundary.
fn strip_dir_prefix<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = path.strip_prefix(prefix.trim_end_matches('/'))?;
    (rest.is_empty() || rest.starts_with('/')).then_some(rest)
}

impl Processor for LocationNormalizer {
    fn name(&self) -> &str {
        "location"
    }

    fn process(&mut self, issues: &[Issue]) -> Result<Vec<Issue>> {
        let mut out = Vec::with_capacity(issues.len());
        for issue in issues {
            let path = self.normalize(issue);
            if self.in_build_cache(&path) {
                log::debug!("Dropping issue located in build cache: {}", path.display());
                continue;
            }
            let mut issue = issue.clone();
            issue.pos.filename = path;
            out.push(issue);
        }
        Ok(out)
    }

    fn finish(&mut self) {}
}

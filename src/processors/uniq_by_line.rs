use super::Processor;
use crate::core::Issue;
use crate::errors::Result;
use std::collections::HashSet;
use std::path::PathBuf;

/// Keeps the first issue reported for each file line, whatever the engine.
///
/// The seen set lives for the whole run.
pub struct UniqByLine {
    enabled: bool,
    seen: HashSet<(PathBuf, usize)>,
}

impl UniqByLine {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            seen: HashSet::new(),
        }
    }
}

impl Processor for UniqByLine {
    fn name(&self) -> &str {
        "uniq_by_line"
    }

    fn process(&mut self, issues: &[Issue]) -> Result<Vec<Issue>> {
        if !self.enabled {
            return Ok(issues.to_vec());
        }
        let mut out = Vec::with_capacity(issues.len());
        for issue in issues {
            if self.seen.insert((issue.file_path().to_path_buf(), issue.line())) {
                out.push(issue.clone());
            }
        }
        Ok(out)
    }

    fn finish(&mut self) {}
}

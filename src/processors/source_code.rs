use super::{transform_issues, Processor};
use crate::core::Issue;
use crate::errors::Result;
use crate::io::LineCache;
use std::sync::Arc;

/// Attaches the source lines an issue covers, for display.
pub struct SourceCode {
    line_cache: Arc<LineCache>,
}

impl SourceCode {
    pub fn new(line_cache: Arc<LineCache>) -> Self {
        Self { line_cache }
    }

    fn attach(&self, issue: &Issue) -> Issue {
        let mut issue = issue.clone();
        if !issue.source_lines.is_empty() {
            return issue;
        }

        let range = issue.line_range();
        let mut lines = Vec::with_capacity(range.to.saturating_sub(range.from) + 1);
        for line in range.from..=range.to.max(range.from) {
            match self.line_cache.get_line(issue.file_path(), line) {
                Ok(text) => lines.push(text),
                Err(e) => {
                    log::warn!("Failed to get line {} for file {}: {e}", line, issue.file_path().display());
                    return issue;
                }
            }
        }
        issue.source_lines = lines;
        issue
    }
}

impl Processor for SourceCode {
    fn name(&self) -> &str {
        "source_code"
    }

    fn process(&mut self, issues: &[Issue]) -> Result<Vec<Issue>> {
        Ok(transform_issues(issues, |issue| self.attach(issue)))
    }

    fn finish(&mut self) {}
}

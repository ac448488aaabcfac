use super::{slash_path, transform_issues, Processor};
use crate::core::Issue;
use crate::errors::Result;
use std::path::Path;

/// Removes the run root from paths quoted inside issue messages.
pub struct PathShortener {
    prefix: String,
}

impl PathShortener {
    pub fn new(root: &Path) -> Self {
        let mut prefix = slash_path(root);
        if !prefix.ends_with('/') {
            prefix.push('/');
        }
        Self { prefix }
    }
}

impl Processor for PathShortener {
    fn name(&self) -> &str {
        "path_shortener"
    }

    fn process(&mut self, issues: &[Issue]) -> Result<Vec<Issue>> {
        Ok(transform_issues(issues, |issue| {
            let mut issue = issue.clone();
            if issue.text.contains(&self.prefix) {
                issue.text = issue.text.replace(&self.prefix, "");
            }
            issue
        }))
    }

    fn finish(&mut self) {}
}

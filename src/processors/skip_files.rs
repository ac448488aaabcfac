use super::{filter_issues, slash_path, Processor};
use crate::core::Issue;
use crate::errors::Result;
use glob::Pattern;

/// Drops issues in files matching any configured glob.
pub struct SkipFiles {
    patterns: Vec<Pattern>,
}

impl SkipFiles {
    pub fn new(patterns: &[String]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| Pattern::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }
}

impl Processor for SkipFiles {
    fn name(&self) -> &str {
        "skip_files"
    }

    fn process(&mut self, issues: &[Issue]) -> Result<Vec<Issue>> {
        if self.patterns.is_empty() {
            return Ok(issues.to_vec());
        }
        Ok(filter_issues(issues, |issue| {
            let path = slash_path(issue.file_path());
            !self.patterns.iter().any(|p| p.matches(&path))
        }))
    }

    fn finish(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processors::test_support::{issue, texts};

    #[test]
    fn test_matching_files_are_dropped() {
        let mut p = SkipFiles::new(&["**/*_generated.rs".into(), "build.rs".into()]).unwrap();
        let out = p
            .process(&[
                issue("e", "src/api_generated.rs", 1, "gen"),
                issue("e", "build.rs", 1, "build"),
                issue("e", "src/lib.rs", 1, "kept"),
            ])
            .unwrap();
        assert_eq!(texts(&out), vec!["kept"]);
    }

    #[test]
    fn test_no_patterns_passes_everything() {
        let mut p = SkipFiles::new(&[]).unwrap();
        let out = p.process(&[issue("e", "a.rs", 1, "x")]).unwrap();
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_invalid_glob_is_rejected() {
        assert!(SkipFiles::new(&["[".into()]).is_err());
    }
}

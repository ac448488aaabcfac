use super::{filter_issues, Processor};
use crate::core::Issue;
use crate::errors::{compile_case_insensitive, Result};
use regex::Regex;

/// Drops issues whose text matches one combined, case-insensitive pattern.
pub struct Exclude {
    pattern: Option<Regex>,
}

impl Exclude {
    /// An empty pattern disables the stage.
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = if pattern.is_empty() {
            None
        } else {
            Some(compile_case_insensitive(pattern)?)
        };
        Ok(Self { pattern })
    }

    /// Joins patterns into one alternation: `(p1|p2|...)`.
    pub fn from_patterns(patterns: &[String]) -> Result<Self> {
        if patterns.is_empty() {
            return Self::new("");
        }
        Self::new(&format!("({})", patterns.join("|")))
    }
}

impl Processor for Exclude {
    fn name(&self) -> &str {
        "exclude"
    }

    fn process(&mut self, issues: &[Issue]) -> Result<Vec<Issue>> {
        match &self.pattern {
            Some(pattern) => Ok(filter_issues(issues, |i| !pattern.is_match(&i.text))),
            None => Ok(issues.to_vec()),
        }
    }

    fn finish(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processors::test_support::{issue, texts};

    #[test]
    fn test_combined_patterns_are_case_insensitive() {
        let mut p = Exclude::from_patterns(&["line is too long".into(), "^TODO".into()]).unwrap();
        let out = p
            .process(&[
                issue("e", "a.rs", 1, "Line is too long (130 > 120)"),
                issue("e", "a.rs", 2, "todo: finish this"),
                issue("e", "a.rs", 3, "missing docs"),
            ])
            .unwrap();
        assert_eq!(texts(&out), vec!["missing docs"]);
    }

    #[test]
    fn test_no_patterns_is_pass_through() {
        let mut p = Exclude::from_patterns(&[]).unwrap();
        let out = p.process(&[issue("e", "a.rs", 1, "anything")]).unwrap();
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        assert!(Exclude::from_patterns(&["(".into()]).is_err());
    }
}

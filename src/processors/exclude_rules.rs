use super::{filter_issues, slash_path, Processor};
use crate::config::ExcludeRuleConfig;
use crate::core::Issue;
use crate::errors::{compile_case_insensitive, Error, Result};
use crate::io::LineCache;
use regex::Regex;
use std::collections::HashSet;
use std::sync::Arc;

/// A compiled exclude rule. Every present field must match for the rule to
/// match; an absent field matches anything.
#[derive(Debug)]
pub struct ExcludeRule {
    text: Option<Regex>,
    source: Option<Regex>,
    path: Option<Regex>,
    engines: HashSet<String>,
}

impl ExcludeRule {
    pub fn compile(config: &ExcludeRuleConfig) -> Result<Self> {
        let compile = |p: &Option<String>| -> Result<Option<Regex>> {
            p.as_deref()
                .filter(|p| !p.is_empty())
                .map(compile_case_insensitive)
                .transpose()
        };

        let rule = Self {
            text: compile(&config.text)?,
            source: compile(&config.source)?,
            path: compile(&config.path)?,
            engines: config.engines.iter().cloned().collect(),
        };
        if rule.is_empty() {
            return Err(Error::Configuration(
                "exclude rule must set at least one of text, source, path or engines".into(),
            ));
        }
        Ok(rule)
    }

    fn is_empty(&self) -> bool {
        self.text.is_none() && self.source.is_none() && self.path.is_none() && self.engines.is_empty()
    }

    fn matches(&self, issue: &Issue, line_cache: &LineCache) -> bool {
        if !self.engines.is_empty() && !self.engines.contains(&issue.from_engine) {
            return false;
        }
        if let Some(text) = &self.text {
            if !text.is_match(&issue.text) {
                return false;
            }
        }
        if let Some(path) = &self.path {
            if !path.is_match(&slash_path(issue.file_path())) {
                return false;
            }
        }
        if let Some(source) = &self.source {
            return match line_cache.get_line(issue.file_path(), issue.line()) {
                Ok(line) => source.is_match(&line),
                Err(e) => {
                    log::warn!("Failed to get line for exclude rule source match: {e}");
                    false
                }
            };
        }
        true
    }
}

/// Drops issues matching any configured exclude rule.
pub struct ExcludeRules {
    rules: Vec<ExcludeRule>,
    line_cache: Arc<LineCache>,
}

impl ExcludeRules {
    pub fn new(rules: Vec<ExcludeRule>, line_cache: Arc<LineCache>) -> Self {
        Self { rules, line_cache }
    }

    pub fn from_config(configs: &[ExcludeRuleConfig], line_cache: Arc<LineCache>) -> Result<Self> {
        let rules = configs
            .iter()
            .enumerate()
            .map(|(i, c)| {
                ExcludeRule::compile(c)
                    .map_err(|e| e.with_context(format!("exclude rule #{}", i + 1)))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(rules, line_cache))
    }
}

impl Processor for ExcludeRules {
    fn name(&self) -> &str {
        "exclude_rules"
    }

    fn process(&mut self, issues: &[Issue]) -> Result<Vec<Issue>> {
        if self.rules.is_empty() {
            return Ok(issues.to_vec());
        }
        let cache = &self.line_cache;
        Ok(filter_issues(issues, |issue| {
            !self.rules.iter().any(|r| r.matches(issue, cache))
        }))
    }

    fn finish(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processors::test_support::{issue, texts};
    use indoc::indoc;
    use std::fs;
    use tempfile::TempDir;

    fn rule(text: Option<&str>, source: Option<&str>, path: Option<&str>, engines: &[&str]) -> ExcludeRuleConfig {
        ExcludeRuleConfig {
            text: text.map(String::from),
            source: source.map(String::from),
            path: path.map(String::from),
            engines: engines.iter().map(|e| e.to_string()).collect(),
        }
    }

    fn no_files() -> Arc<LineCache> {
        Arc::new(LineCache::new("/nonexistent-lintmux-root"))
    }

    #[test]
    fn test_text_rule_drops_matching_issue() {
        let mut p =
            ExcludeRules::from_config(&[rule(Some("unused variable"), None, None, &[])], no_files())
                .unwrap();
        let out = p
            .process(&[
                issue("a", "a.rs", 1, "unused variable x"),
                issue("a", "a.rs", 2, "undefined symbol y"),
            ])
            .unwrap();
        assert_eq!(texts(&out), vec!["undefined symbol y"]);
    }

    #[test]
    fn test_all_fields_must_match() {
        let mut p = ExcludeRules::from_config(
            &[rule(Some("magic number"), None, Some(r"_test\.rs$"), &["style"])],
            no_files(),
        )
        .unwrap();
        let out = p
            .process(&[
                issue("style", "src/a_test.rs", 1, "Magic number 42"),
                issue("style", "src/a.rs", 1, "Magic number 42"),
                issue("other", "src/a_test.rs", 1, "Magic number 42"),
            ])
            .unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].file_path(), std::path::Path::new("src/a.rs"));
        assert_eq!(out[1].from_engine, "other");
    }

    #[test]
    fn test_source_rule_reads_line_from_disk() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("main.rs"),
            indoc! {"
                fn main() {
                    let _ = run(); // lint:allow-discard
                    let _ = run();
                }
            "},
        )
        .unwrap();
        let cache = Arc::new(LineCache::new(dir.path()));
        let mut p =
            ExcludeRules::from_config(&[rule(None, Some("lint:allow-discard"), None, &[])], cache)
                .unwrap();

        let mut with_snippet = issue("e", "main.rs", 3, "discarded result");
        with_snippet.source_lines = vec!["// lint:allow-discard".into()];
        let out = p
            .process(&[issue("e", "main.rs", 2, "discarded result"), with_snippet])
            .unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].line(), 3);
    }

    #[test]
    fn test_unreadable_source_does_not_match() {
        let mut p =
            ExcludeRules::from_config(&[rule(None, Some("anything"), None, &[])], no_files()).unwrap();
        let out = p.process(&[issue("e", "gone.rs", 1, "x")]).unwrap();
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_empty_rule_is_rejected() {
        let err = ExcludeRules::from_config(&[rule(None, None, None, &[])], no_files())
            .err()
            .unwrap();
        assert!(err.to_string().contains("exclude rule #1"));
    }
}

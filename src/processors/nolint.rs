//! In-line suppression directives.
//!
//! A directive is a comment of the form `nolint`, `nolint:eng1,eng2` or
//! `nolint:eng // reason`. Written after code it suppresses issues on its
//! own line; alone on a line it suppresses issues on the following line.
//! An empty engine list, or `all`, suppresses every engine.

use super::Processor;
use crate::core::{Issue, Position};
use crate::errors::Result;
use crate::io::LineCache;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Engine name used for unused-directive diagnostics.
pub const NOLINT_ENGINE: &str = "nolint";

static DIRECTIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|\s|;)(?://|#|--|/\*)\s*nolint\b(?::\s*([\w.:-]+(?:\s*,\s*[\w.:-]+)*))?")
        .expect("valid nolint directive regex")
});

#[derive(Debug, Clone)]
struct Directive {
    /// 1-based line the comment is written on
    line: usize,
    /// 1-based line whose issues are suppressed
    target_line: usize,
    engines: Vec<String>,
    text: String,
    matched: bool,
    reported: bool,
}

impl Directive {
    fn matches_engine(&self, engine: &str) -> bool {
        self.engines.is_empty() || self.engines.iter().any(|e| e == "all" || e == engine)
    }
}

fn parse_directives(lines: &[String]) -> Vec<Directive> {
    let mut directives = Vec::new();
    for (index, line) in lines.iter().enumerate() {
        let Some(caps) = DIRECTIVE.captures(line) else {
            continue;
        };
        let Some(whole) = caps.get(0) else {
            continue;
        };

        let line_no = index + 1;
        let comment_only = line[..whole.start()].trim().is_empty();
        let engines = caps
            .get(1)
            .map(|m| {
                m.as_str()
                    .split(',')
                    .map(|e| e.trim().to_string())
                    .filter(|e| !e.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        directives.push(Directive {
            line: line_no,
            target_line: if comment_only { line_no + 1 } else { line_no },
            engines,
            text: whole.as_str().trim_start_matches([' ', '\t', ';']).to_string(),
            matched: false,
            reported: false,
        });
    }
    directives
}

pub struct Nolint {
    line_cache: Arc<LineCache>,
    enabled_engines: HashSet<String>,
    report_unused: bool,
    files: BTreeMap<PathBuf, Vec<Directive>>,
    unknown_engines: BTreeSet<String>,
}

impl Nolint {
    pub fn new(
        line_cache: Arc<LineCache>,
        enabled_engines: &[String],
        report_unused: bool,
    ) -> Self {
        Self {
            line_cache,
            enabled_engines: enabled_engines.iter().cloned().collect(),
            report_unused,
            files: BTreeMap::new(),
            unknown_engines: BTreeSet::new(),
        }
    }

    fn load_file(&mut self, path: &Path) -> Result<()> {
        if self.files.contains_key(path) {
            return Ok(());
        }
        let lines = self.line_cache.get_lines(path)?;
        let directives = parse_directives(&lines);
        for directive in &directives {
            for engine in &directive.engines {
                if engine != "all" && !self.enabled_engines.contains(engine) {
                    self.unknown_engines.insert(engine.clone());
                }
            }
        }
        self.files.insert(path.to_path_buf(), directives);
        Ok(())
    }

    /// Marks the first directive covering the issue as used.
    fn suppress(&mut self, issue: &Issue) -> bool {
        let Some(directives) = self.files.get_mut(issue.file_path()) else {
            return false;
        };
        let line = issue.line();
        match directives
            .iter_mut()
            .find(|d| d.target_line == line && d.matches_engine(&issue.from_engine))
        {
            Some(directive) => {
                directive.matched = true;
                true
            }
            None => false,
        }
    }

    fn should_report(&self, directive: &Directive) -> bool {
        !directive.matched
            && !directive.reported
            && directive
                .engines
                .iter()
                .all(|e| e == "all" || self.enabled_engines.contains(e))
    }

    fn take_unused(&mut self) -> Vec<Issue> {
        let mut reportable = Vec::new();
        for (path, directives) in &self.files {
            for (index, directive) in directives.iter().enumerate() {
                if self.should_report(directive) {
                    reportable.push((path.clone(), index));
                }
            }
        }

        let mut unused = Vec::new();
        for (path, index) in reportable {
            let Some(directive) = self.files.get_mut(&path).and_then(|d| d.get_mut(index)) else {
                continue;
            };
            directive.reported = true;
            unused.push(
                Issue::new(
                    format!("directive `{}` is unused", directive.text),
                    Position::new(path, directive.line),
                )
                .from_engine(NOLINT_ENGINE)
                .with_rule("unused-directive"),
            );
        }
        unused
    }
}

impl Processor for Nolint {
    fn name(&self) -> &str {
        "nolint"
    }

    fn process(&mut self, issues: &[Issue]) -> Result<Vec<Issue>> {
        for issue in issues {
            self.load_file(issue.file_path())?;
        }

        let mut out = Vec::with_capacity(issues.len());
        for issue in issues {
            if !self.suppress(issue) {
                out.push(issue.clone());
            }
        }

        if self.report_unused {
            out.extend(self.take_unused());
        }
        Ok(out)
    }

    fn finish(&mut self) {
        if !self.unknown_engines.is_empty() {
            let names: Vec<&str> = self.unknown_engines.iter().map(String::as_str).collect();
            log::warn!(
                "Found unknown engines in the nolint directives: {}",
                names.join(", ")
            );
        }
    }
}

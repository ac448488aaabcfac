use super::{transform_issues, Processor};
use crate::core::Issue;
use crate::errors::Result;
use once_cell::sync::Lazy;
use regex::Regex;

struct MarkRule {
    pattern: Regex,
    replacement: &'static str,
}

/// Message shapes whose identifier is wrapped in backticks. First match wins.
static MARK_RULES: Lazy<Vec<MarkRule>> = Lazy::new(|| {
    [
        (
            r"^exported (\w+) ([\w.]+) should have comment( \(or a comment on this block\))? or be unexported$",
            "exported ${1} `${2}` should have comment${3} or be unexported",
        ),
        (
            r"^(func|fn|function|method|type|struct|field|const|var|enum) ([\w.]+) is unused$",
            "${1} `${2}` is unused",
        ),
        (r"^([\w.]+) is unused$", "`${1}` is unused"),
        (r"^unused variable ([\w.]+)$", "unused variable `${1}`"),
        (r"^undefined: ([\w.]+)$", "undefined: `${1}`"),
        (r"^undeclared name: ([\w.]+)$", "undeclared name: `${1}`"),
        (
            r"^([\w.]+) redeclared in this block$",
            "`${1}` redeclared in this block",
        ),
        (
            r"^should replace loop with (.*)$",
            "should replace loop with `${1}`",
        ),
    ]
    .into_iter()
    .map(|(pattern, replacement)| MarkRule {
        pattern: Regex::new(pattern).expect("valid identifier marker rule"),
        replacement,
    })
    .collect()
});

static QUOTED_IDENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"'([A-Za-z_][\w.]*)'|"([A-Za-z_][\w.]*)""#).expect("valid quoted identifier regex")
});

/// Wraps identifiers mentioned in issue messages in backticks so exclusion
/// patterns can target the marked form.
#[derive(Default)]
pub struct IdentifierMarker;

impl IdentifierMarker {
    pub fn new() -> Self {
        Self
    }
}

pub fn mark_identifiers(text: &str) -> String {
    if let Some(rule) = MARK_RULES.iter().find(|r| r.pattern.is_match(text)) {
        return rule.pattern.replace(text, rule.replacement).into_owned();
    }

    QUOTED_IDENT
        .replace_all(text, |caps: &regex::Captures| {
            let ident = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
            format!("`{ident}`")
        })
        .into_owned()
}

impl Processor for IdentifierMarker {
    fn name(&self) -> &str {
        "identifier_marker"
    }

    fn process(&mut self, issues: &[Issue]) -> Result<Vec<Issue>> {
        Ok(transform_issues(issues, |issue| {
            let mut issue = issue.clone();
            issue.text = mark_identifiers(&issue.text);
            issue
        }))
    }

    fn finish(&mut self) {}
}

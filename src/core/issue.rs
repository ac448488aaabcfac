use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Location of an issue inside a source file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub filename: PathBuf,
    pub line: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
}

impl Position {
    pub fn new(filename: impl Into<PathBuf>, line: usize) -> Self {
        Self {
            filename: filename.into(),
            line,
            column: None,
        }
    }

    pub fn with_column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }
}

/// Inclusive range of lines an issue spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineRange {
    pub from: usize,
    pub to: usize,
}

/// Suggested fix attached by an engine.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Replacement {
    #[serde(default)]
    pub new_lines: Vec<String>,
    #[serde(default)]
    pub need_only_delete: bool,
}

/// A single diagnostic finding produced by an engine.
///
/// `from_engine` is set once, either by the engine or by the executor,
/// and is never overwritten afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(default)]
    pub from_engine: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    pub pos: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_range: Option<LineRange>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source_lines: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replacement: Option<Replacement>,
}

impl Issue {
    pub fn new(text: impl Into<String>, pos: Position) -> Self {
        Self {
            from_engine: String::new(),
            text: text.into(),
            severity: None,
            rule: None,
            pos,
            line_range: None,
            source_lines: Vec::new(),
            replacement: None,
        }
    }

    pub fn from_engine(mut self, engine: impl Into<String>) -> Self {
        self.from_engine = engine.into();
        self
    }

    pub fn with_severity(mut self, severity: impl Into<String>) -> Self {
        self.severity = Some(severity.into());
        self
    }

    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.rule = Some(rule.into());
        self
    }

    pub fn with_line_range(mut self, from: usize, to: usize) -> Self {
        self.line_range = Some(LineRange { from, to });
        self
    }

    pub fn file_path(&self) -> &Path {
        &self.pos.filename
    }

    pub fn line(&self) -> usize {
        self.pos.line
    }

    /// The lines this issue covers, falling back to its own line.
    pub fn line_range(&self) -> LineRange {
        self.line_range.unwrap_or(LineRange {
            from: self.pos.line,
            to: self.pos.line,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_range_defaults_to_position_line() {
        let issue = Issue::new("msg", Position::new("a.rs", 7));
        assert_eq!(issue.line_range(), LineRange { from: 7, to: 7 });
    }

    #[test]
    fn test_explicit_line_range_wins() {
        let issue = Issue::new("msg", Position::new("a.rs", 7)).with_line_range(5, 9);
        assert_eq!(issue.line_range(), LineRange { from: 5, to: 9 });
    }

    #[test]
    fn test_deserialize_minimal_issue() {
        let json = r#"{"text":"unused variable x","pos":{"filename":"src/a.rs","line":3}}"#;
        let issue: Issue = serde_json::from_str(json).unwrap();
        assert!(issue.from_engine.is_empty());
        assert_eq!(issue.pos.column, None);
        assert!(issue.source_lines.is_empty());
    }
}

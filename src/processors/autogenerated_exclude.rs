use super::Processor;
use crate::core::Issue;
use crate::errors::Result;
use crate::io::LineCache;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const GENERATED_MARKERS: &[&str] = &[
    "code generated",
    "do not edit",
    "autogenerated file",
    "automatically generated",
    "@generated",
];

const COMMENT_PREFIXES: &[&str] = &["//", "#", "/*", "*", "--", "<!--", ";"];

/// Drops issues located in machine-generated files.
///
/// A file counts as generated when its leading comment block mentions one of
/// the usual generator markers. The verdict is cached per file.
pub struct AutogeneratedExclude {
    line_cache: Arc<LineCache>,
    verdicts: HashMap<PathBuf, bool>,
}

impl AutogeneratedExclude {
    pub fn new(line_cache: Arc<LineCache>) -> Self {
        Self {
            line_cache,
            verdicts: HashMap::new(),
        }
    }

    fn is_generated(&mut self, path: &Path) -> Result<bool> {
        if let Some(&generated) = self.verdicts.get(path) {
            return Ok(generated);
        }

        let lines = self.line_cache.get_lines(path)?;
        let doc = leading_comment_block(&lines);
        let generated = is_generated_doc(&doc);
        if generated {
            log::debug!("File {} is autogenerated", path.display());
        }

        self.verdicts.insert(path.to_path_buf(), generated);
        Ok(generated)
    }
}

/// Text of the comment lines at the top of a file, blank lines skipped,
/// up to the first line of code.
fn leading_comment_block(lines: &[String]) -> String {
    let mut doc = String::new();
    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let Some(prefix) = COMMENT_PREFIXES.iter().find(|p| trimmed.starts_with(**p)) else {
            break;
        };
        doc.push_str(trimmed[prefix.len()..].trim());
        doc.push('\n');
    }
    doc
}

fn is_generated_doc(doc: &str) -> bool {
    let doc = doc.to_lowercase();
    GENERATED_MARKERS.iter().any(|m| doc.contains(m))
}

impl Processor for AutogeneratedExclude {
    fn name(&self) -> &str {
        "autogenerated_exclude"
    }

    fn process(&mut self, issues: &[Issue]) -> Result<Vec<Issue>> {
        let mut out = Vec::with_capacity(issues.len());
        for issue in issues {
            if !self.is_generated(issue.file_path())? {
                out.push(issue.clone());
            }
        }
        Ok(out)
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

    fn setup() -> (TempDir, AutogeneratedExclude) {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("gen.rs"),
            indoc! {"
                // Code generated by protoc-gen-rust. DO NOT EDIT.
                // source: api.proto

                pub struct Request;
            "},
        )
        .unwrap();
        fs::write(
            dir.path().join("lib.rs"),
            indoc! {"
                //! Handwritten module.

                pub fn main() {}
                // do not edit below this line
            "},
        )
        .unwrap();
        let cache = Arc::new(LineCache::new(dir.path()));
        (dir, AutogeneratedExclude::new(cache))
    }

    #[test]
    fn test_generated_file_issues_are_dropped() {
        let (_dir, mut p) = setup();
        let out = p
            .process(&[
                issue("e", "gen.rs", 4, "generated"),
                issue("e", "lib.rs", 3, "handwritten"),
            ])
            .unwrap();
        assert_eq!(texts(&out), vec!["handwritten"]);
    }

    #[test]
    fn test_markers_after_code_are_ignored() {
        let lines: Vec<String> = vec!["fn main() {}".into(), "// @generated".into()];
        assert!(!is_generated_doc(&leading_comment_block(&lines)));
    }

    #[test]
    fn test_block_comment_header() {
        let lines: Vec<String> = vec![
            "/*".into(),
            " * This file was automatically generated.".into(),
            " */".into(),
            "int x;".into(),
        ];
        assert!(is_generated_doc(&leading_comment_block(&lines)));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let (_dir, mut p) = setup();
        assert!(p.process(&[issue("e", "missing.rs", 1, "x")]).is_err());
    }
}

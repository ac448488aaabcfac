use super::{slash_path, Processor};
use crate::core::Issue;
use crate::errors::{Error, Result};
use regex::Regex;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Drops issues whose directory matches a skip pattern.
///
/// Patterns are matched against the whole root-relative directory, so a
/// pattern anchored on path separators also covers every ancestor. Must
/// run after path prettifying. Directories the user asked for explicitly
/// are never skipped.
pub struct SkipDirs {
    patterns: Vec<Regex>,
    root: PathBuf,
    arg_dirs: HashSet<PathBuf>,
    decisions: HashMap<PathBuf, bool>,
    skipped: BTreeMap<String, (String, usize)>,
}

impl SkipDirs {
    pub fn new(patterns: &[String], root: impl Into<PathBuf>, args: &[PathBuf]) -> Result<Self> {
        let root = root.into();
        let patterns = patterns
            .iter()
            .map(|p| Regex::new(p).map_err(|e| Error::regex(p.as_str(), e)))
            .collect::<Result<Vec<_>>>()?;
        let arg_dirs = args.iter().map(|a| normalize(&root.join(a))).collect();

        Ok(Self {
            patterns,
            root,
            arg_dirs,
            decisions: HashMap::new(),
            skipped: BTreeMap::new(),
        })
    }

    fn should_pass(&mut self, issue: &Issue) -> bool {
        let path = issue.file_path();
        if path.is_absolute() {
            log::debug!(
                "Got absolute path {} in skip dirs, expected it to be relative",
                path.display()
            );
            return true;
        }

        let rel_dir = path.parent().unwrap_or_else(|| Path::new("")).to_path_buf();
        if let Some(&pass) = self.decisions.get(&rel_dir) {
            if !pass {
                self.count_skip(&rel_dir, None);
            }
            return pass;
        }

        let pass = self.decide(&rel_dir);
        self.decisions.insert(rel_dir, pass);
        pass
    }

    fn decide(&mut self, rel_dir: &Path) -> bool {
        if self.arg_dirs.contains(&normalize(&self.root.join(rel_dir))) {
            return true;
        }

        let dir = slash_path(rel_dir);
        let matched = self
            .patterns
            .iter()
            .find(|p| p.is_match(&dir))
            .map(|p| p.as_str().to_string());
        match matched {
            Some(pattern) => {
                self.count_skip(rel_dir, Some(pattern));
                false
            }
            None => true,
        }
    }

    fn count_skip(&mut self, rel_dir: &Path, pattern: Option<String>) {
        let entry = self
            .skipped
            .entry(slash_path(rel_dir))
            .or_insert_with(|| (String::new(), 0));
        if let Some(pattern) = pattern {
            entry.0 = pattern;
        }
        entry.1 += 1;
    }

    /// Directories skipped so far with the pattern that matched and the
    /// number of dropped issues.
    pub fn skipped(&self) -> &BTreeMap<String, (String, usize)> {
        &self.skipped
    }
}

fn normalize(path: &Path) -> PathBuf {
    path.components().collect()
}

impl Processor for SkipDirs {
    fn name(&self) -> &str {
        "skip_dirs"
    }

    fn process(&mut self, issues: &[Issue]) -> Result<Vec<Issue>> {
        if self.patterns.is_empty() {
            return Ok(issues.to_vec());
        }
        let mut out = Vec::with_capacity(issues.len());
        for issue in issues {
            if self.should_pass(issue) {
                out.push(issue.clone());
            }
        }
        Ok(out)
    }

    fn finish(&mut self) {
        for (dir, (pattern, count)) in &self.skipped {
            log::info!(
                "Skipped {} issues from dir {} by pattern {}",
                count,
                dir,
                pattern
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_skip_dirs;
    use crate::processors::test_support::{issue, texts};

    #[test]
    fn test_default_dirs_are_skipped_at_any_depth() {
        let mut p = SkipDirs::new(&default_skip_dirs(), "/repo", &[]).unwrap();
        let out = p
            .process(&[
                issue("e", "vendor/lib/a.rs", 1, "vendored"),
                issue("e", "crates/x/testdata/b.rs", 1, "fixture"),
                issue("e", "src/vendored.rs", 1, "kept"),
            ])
            .unwrap();
        assert_eq!(texts(&out), vec!["kept"]);
    }

    #[test]
    fn test_explicit_arg_dir_is_not_skipped() {
        let mut p = SkipDirs::new(
            &default_skip_dirs(),
            "/repo",
            &[PathBuf::from("vendor/lib")],
        )
        .unwrap();
        let out = p
            .process(&[
                issue("e", "vendor/lib/a.rs", 1, "requested"),
                issue("e", "vendor/other/b.rs", 1, "skipped"),
            ])
            .unwrap();
        assert_eq!(texts(&out), vec!["requested"]);
    }

    #[test]
    fn test_skip_counts_accumulate_per_dir() {
        let mut p = SkipDirs::new(&[r"^gen$".into()], "/repo", &[]).unwrap();
        p.process(&[
            issue("e", "gen/a.rs", 1, "a"),
            issue("e", "gen/b.rs", 2, "b"),
            issue("e", "src/c.rs", 3, "c"),
        ])
        .unwrap();
        assert_eq!(p.skipped()["gen"], (r"^gen$".to_string(), 2));
    }

    #[test]
    fn test_absolute_paths_pass() {
        let mut p = SkipDirs::new(&default_skip_dirs(), "/repo", &[]).unwrap();
        let out = p.process(&[issue("e", "/elsewhere/vendor/a.rs", 1, "x")]).unwrap();
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        assert!(SkipDirs::new(&["(".into()], "/repo", &[]).is_err());
    }
}

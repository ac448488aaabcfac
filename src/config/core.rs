use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Root configuration structure, loaded from `.lintmux.toml`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// How engines are run and which files are considered
    #[serde(default)]
    pub run: RunConfig,

    /// Issue filtering and limits
    #[serde(default)]
    pub issues: IssuesConfig,

    /// Output shaping
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Directory issue paths are made relative to (defaults to the working directory)
    #[serde(default)]
    pub root: Option<PathBuf>,

    /// Paths explicitly requested by the user; never skipped by `skip_dirs`
    #[serde(default)]
    pub args: Vec<PathBuf>,

    /// Globs of files whose issues are dropped
    #[serde(default)]
    pub skip_files: Vec<String>,

    /// Regular expressions of directories whose issues are dropped
    #[serde(default)]
    pub skip_dirs: Vec<String>,

    #[serde(default = "default_true")]
    pub use_default_skip_dirs: bool,

    /// Directories holding build-tool output; issues located there are dropped
    #[serde(default)]
    pub build_cache_dirs: Vec<PathBuf>,

    /// Per-engine rewrites of reported path prefixes
    #[serde(default)]
    pub path_mappings: Vec<PathMapping>,

    /// Report engine failures as a run error
    #[serde(default = "default_true")]
    pub fail_fast: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            root: None,
            args: Vec::new(),
            skip_files: Vec::new(),
            skip_dirs: Vec::new(),
            use_default_skip_dirs: default_true(),
            build_cache_dirs: Vec::new(),
            path_mappings: Vec::new(),
            fail_fast: default_true(),
        }
    }
}

/// Rewrites a leading path prefix, optionally only for one engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PathMapping {
    #[serde(default)]
    pub engine: Option<String>,
    pub from: String,
    #[serde(default)]
    pub to: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuesConfig {
    /// Message patterns excluded in addition to the defaults
    #[serde(default)]
    pub exclude: Vec<String>,

    #[serde(default = "default_true")]
    pub use_default_excludes: bool,

    #[serde(default)]
    pub exclude_rules: Vec<ExcludeRuleConfig>,

    /// Maximum issues reported per engine, 0 disables the limit
    #[serde(default = "default_max_issues_per_engine")]
    pub max_issues_per_engine: usize,

    /// Maximum issues sharing the same text, 0 disables the limit
    #[serde(default = "default_max_same_issues")]
    pub max_same_issues: usize,

    /// Per-engine limit of issues within a single file
    #[serde(default)]
    pub max_per_file_per_engine: HashMap<String, usize>,

    /// Only report issues on lines changed in the working tree
    #[serde(default)]
    pub new: bool,

    /// Only report issues on lines changed since this revision
    #[serde(default)]
    pub new_from_rev: Option<String>,

    /// Only report issues on lines added by this patch
    #[serde(default)]
    pub new_from_patch: Option<PathBuf>,

    /// Emit an issue for every suppression directive that suppressed nothing
    #[serde(default)]
    pub report_unused_directives: bool,
}

impl Default for IssuesConfig {
    fn default() -> Self {
        Self {
            exclude: Vec::new(),
            use_default_excludes: default_true(),
            exclude_rules: Vec::new(),
            max_issues_per_engine: default_max_issues_per_engine(),
            max_same_issues: default_max_same_issues(),
            max_per_file_per_engine: HashMap::new(),
            new: false,
            new_from_rev: None,
            new_from_patch: None,
            report_unused_directives: false,
        }
    }
}

impl IssuesConfig {
    pub fn diff_enabled(&self) -> bool {
        self.new || self.new_from_rev.is_some() || self.new_from_patch.is_some()
    }
}

/// A declarative exclusion as written in configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ExcludeRuleConfig {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub engines: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Keep at most one issue per file line
    #[serde(default = "default_true")]
    pub uniq_by_line: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            uniq_by_line: default_true(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_max_issues_per_engine() -> usize {
    50
}
fn default_max_same_issues() -> usize {
    3
}

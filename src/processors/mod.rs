//! Ordered issue processors.
//!
//! Every processor receives the previous processor's output and returns a
//! new issue list. Processors may keep private state for the whole run
//! (seen sets, counters); `finish` is called once after the last
//! processor has run, and is where deferred summaries are logged.
//!
//! The chain order is fixed in [`crate::runner::Runner::new`].

pub mod autogenerated_exclude;
pub mod diff;
pub mod exclude;
pub mod exclude_rules;
pub mod identifier_marker;
pub mod location;
pub mod max_from_engine;
pub mod max_per_file_from_engine;
pub mod max_same_issues;
pub mod nolint;
pub mod path_prettifier;
pub mod path_shortener;
pub mod skip_dirs;
pub mod skip_files;
pub mod source_code;
pub mod uniq_by_line;

pub use autogenerated_exclude::AutogeneratedExclude;
pub use diff::{Diff, DiffSource};
pub use exclude::Exclude;
pub use exclude_rules::{ExcludeRule, ExcludeRules};
pub use identifier_marker::IdentifierMarker;
pub use location::LocationNormalizer;
pub use max_from_engine::MaxFromEngine;
pub use max_per_file_from_engine::MaxPerFileFromEngine;
pub use max_same_issues::MaxSameIssues;
pub use nolint::Nolint;
pub use path_prettifier::PathPrettifier;
pub use path_shortener::PathShortener;
pub use skip_dirs::SkipDirs;
pub use skip_files::SkipFiles;
pub use source_code::SourceCode;
pub use uniq_by_line::UniqByLine;

use crate::core::Issue;
use crate::errors::Result;
use std::path::Path;

/// A named, stateful stage of the issue pipeline.
pub trait Processor {
    fn name(&self) -> &str;

    /// Transform the issues. The input is left untouched so the runner can
    /// fall back to it when this returns an error.
    fn process(&mut self, issues: &[Issue]) -> Result<Vec<Issue>>;

    /// Called once at the end of the run.
    fn finish(&mut self);
}

pub(crate) fn filter_issues(issues: &[Issue], mut keep: impl FnMut(&Issue) -> bool) -> Vec<Issue> {
    issues.iter().filter(|i| keep(i)).cloned().collect()
}

pub(crate) fn filter_issues_fallible(
    issues: &[Issue],
    mut keep: impl FnMut(&Issue) -> Result<bool>,
) -> Result<Vec<Issue>> {
    let mut out = Vec::with_capacity(issues.len());
    for issue in issues {
        if keep(issue)? {
            out.push(issue.clone());
        }
    }
    Ok(out)
}

pub(crate) fn transform_issues(issues: &[Issue], f: impl FnMut(&Issue) -> Issue) -> Vec<Issue> {
    issues.iter().map(f).collect()
}

/// Path rendered with forward slashes, for pattern matching.
pub(crate) fn slash_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

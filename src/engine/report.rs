use super::Engine;
use crate::context::{AnalysisContext, ExecutionContext};
use crate::core::Issue;
use anyhow::{Context as _, Result};
use std::fs;
use std::path::PathBuf;

/// Engine backed by a JSON report written by an external tool.
///
/// The report is a JSON array of issues. Relative report paths are resolved
/// against the run root. Issues may name their own `from_engine`, which is
/// useful for reports that aggregate several tools.
#[derive(Debug, Clone)]
pub struct ReportEngine {
    name: String,
    path: PathBuf,
}

impl ReportEngine {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Parse a `name=path` command-line argument.
    pub fn from_arg(arg: &str) -> Result<Self> {
        match arg.split_once('=') {
            Some((name, path)) if !name.is_empty() && !path.is_empty() => {
                Ok(Self::new(name, path))
            }
            _ => anyhow::bail!("Invalid report argument {arg:?}, expected NAME=PATH"),
        }
    }
}

impl Engine for ReportEngine {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, exec: &ExecutionContext, ctx: &AnalysisContext) -> Result<Vec<Issue>> {
        if exec.is_cancelled() {
            anyhow::bail!("cancelled before reading {}", self.path.display());
        }

        let path = if self.path.is_absolute() {
            self.path.clone()
        } else {
            ctx.root().join(&self.path)
        };
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read report {}", path.display()))?;
        let issues: Vec<Issue> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse report {}", path.display()))?;
        Ok(issues)
    }
}

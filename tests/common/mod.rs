// Test utility module for lintmux integration tests
#![allow(dead_code)]

use lintmux::config::Config;
use lintmux::context::{AnalysisContext, ExecutionContext};
use lintmux::core::{Issue, Position};
use lintmux::engine::{DiagnosedPanic, Engine};
use lintmux::io::LineCache;
use lintmux::runner::{RunOutcome, Runner};
use std::path::Path;
use std::sync::Arc;

pub fn issue(engine: &str, file: &str, line: usize, text: &str) -> Issue {
    Issue::new(text, Position::new(file, line)).from_engine(engine)
}

pub fn texts(issues: &[Issue]) -> Vec<&str> {
    issues.iter().map(|i| i.text.as_str()).collect()
}

/// Engine returning a fixed list of issues.
pub struct StaticEngine {
    name: String,
    issues: Vec<Issue>,
}

impl StaticEngine {
    pub fn new(name: &str, issues: Vec<Issue>) -> Self {
        Self {
            name: name.to_string(),
            issues,
        }
    }
}

impl Engine for StaticEngine {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, _: &ExecutionContext, _: &AnalysisContext) -> anyhow::Result<Vec<Issue>> {
        Ok(self.issues.clone())
    }
}

/// How a [`FaultyEngine`] fails.
#[derive(Debug, Clone, Copy)]
pub enum Fault {
    Error,
    Panic,
    DiagnosedPanic,
}

pub struct FaultyEngine {
    name: String,
    fault: Fault,
}

impl FaultyEngine {
    pub fn new(name: &str, fault: Fault) -> Self {
        Self {
            name: name.to_string(),
            fault,
        }
    }
}

impl Engine for FaultyEngine {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, _: &ExecutionContext, _: &AnalysisContext) -> anyhow::Result<Vec<Issue>> {
        match self.fault {
            Fault::Error => anyhow::bail!("{} could not start", self.name),
            Fault::Panic => panic!("{} exploded", self.name),
            Fault::DiagnosedPanic => DiagnosedPanic::new("worker died", "at worker.rs:10").raise(),
        }
    }
}

pub fn boxed(engine: impl Engine + 'static) -> Box<dyn Engine> {
    Box::new(engine)
}

/// A temporary source tree with a config, ready to run engines against.
pub struct Workspace {
    pub dir: tempfile::TempDir,
    pub config: Config,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::TempDir::new().expect("Failed to create temp dir"),
            config: Config::default(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write a source file, creating parent directories.
    pub fn file(self, rel: &str, content: &str) -> Self {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create dirs");
        }
        std::fs::write(&path, content).expect("Failed to write test file");
        self
    }

    /// Write raw bytes, for sources that are not valid UTF-8.
    pub fn bytes(self, rel: &str, content: &[u8]) -> Self {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create dirs");
        }
        std::fs::write(&path, content).expect("Failed to write test file");
        self
    }

    /// A file with `lines` numbered lines of code.
    pub fn lines(self, rel: &str, lines: usize) -> Self {
        let content: String = (1..=lines).map(|i| format!("let v{i} = {i};\n")).collect();
        self.file(rel, &content)
    }

    pub fn configure(mut self, f: impl FnOnce(&mut Config)) -> Self {
        f(&mut self.config);
        self
    }

    pub fn run(&self, engines: &[Box<dyn Engine>]) -> RunOutcome {
        let names: Vec<String> = engines.iter().map(|e| e.name().to_string()).collect();
        let line_cache = Arc::new(LineCache::new(self.root()));
        let mut runner = Runner::new(&self.config, Arc::clone(&line_cache), &names)
            .expect("Failed to build runner");
        let ctx = AnalysisContext::new(self.root(), Arc::new(self.config.clone()))
            .with_line_cache(line_cache);
        runner.run(engines, &ExecutionContext::new(), &ctx)
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

//! Contexts handed to engines during a run.
//!
//! `AnalysisContext` is shared read-only by every engine of one run.
//! `ExecutionContext` carries the caller's cancellation signal; engines are
//! expected to poll it, the runner never does.

use crate::config::Config;
use crate::io::LineCache;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared, read-only state for all engines in one run.
#[derive(Debug, Clone)]
pub struct AnalysisContext {
    root: PathBuf,
    config: Arc<Config>,
    line_cache: Arc<LineCache>,
}

impl AnalysisContext {
    pub fn new(root: impl Into<PathBuf>, config: Arc<Config>) -> Self {
        let root = root.into();
        let line_cache = Arc::new(LineCache::new(root.clone()));
        Self {
            root,
            config,
            line_cache,
        }
    }

    /// Share an existing line cache, typically the one the runner's
    /// processors were built with.
    pub fn with_line_cache(mut self, line_cache: Arc<LineCache>) -> Self {
        self.line_cache = line_cache;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn line_cache(&self) -> &Arc<LineCache> {
        &self.line_cache
    }
}

/// Cooperative cancellation flag shared between a caller and its engines.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Per-invocation execution state.
#[derive(Debug, Clone, Default)]
pub struct ExecutionContext {
    cancellation: CancellationToken,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancellation(cancellation: CancellationToken) -> Self {
        Self { cancellation }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancellation_is_shared_between_clones() {
        let token = CancellationToken::new();
        let exec = ExecutionContext::with_cancellation(token.clone());
        assert!(!exec.is_cancelled());
        token.cancel();
        assert!(exec.is_cancelled());
    }

    #[test]
    fn test_analysis_context_line_cache_uses_root() {
        let ctx = AnalysisContext::new("/repo", Arc::new(Config::default()));
        assert_eq!(ctx.line_cache().root(), Path::new("/repo"));
    }
}

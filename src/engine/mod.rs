//! Analysis engines and their isolated execution.
//!
//! An engine is any independent unit of analysis that turns a shared,
//! read-only [`AnalysisContext`] into a list of issues. Engines are run one
//! at a time by the runner through [`executor::run_engine_safe`], which
//! converts both error returns and panics into an [`EngineFailure`].

pub mod executor;
pub mod report;

pub use executor::{run_engine_safe, DiagnosedPanic, EngineFailure};
pub use report::ReportEngine;

use crate::context::{AnalysisContext, ExecutionContext};
use crate::core::Issue;

/// A named unit of analysis.
///
/// Engines may leave `Issue::from_engine` empty; the executor then stamps
/// the engine's name. Engines that aggregate other tools may tag issues
/// with a different name, which is kept.
pub trait Engine: Send + Sync {
    fn name(&self) -> &str;

    /// Run the analysis once. Long-running engines should poll
    /// `exec.is_cancelled()` and stop early.
    fn run(&self, exec: &ExecutionContext, ctx: &AnalysisContext) -> anyhow::Result<Vec<Issue>>;
}

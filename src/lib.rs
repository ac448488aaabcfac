// Export modules for library usage
pub mod cli;
pub mod config;
pub mod context;
pub mod core;
pub mod diff;
pub mod engine;
pub mod errors;
pub mod io;
pub mod observability;
pub mod processors;
pub mod runner;

// Re-export commonly used types
pub use crate::core::{Issue, LineRange, Position, Replacement};

pub use crate::config::{load_config, Config, ExcludeRuleConfig};

pub use crate::context::{AnalysisContext, CancellationToken, ExecutionContext};

pub use crate::engine::{run_engine_safe, DiagnosedPanic, Engine, EngineFailure, ReportEngine};

pub use crate::errors::{Error, Result};

pub use crate::io::LineCache;

pub use crate::processors::Processor;

pub use crate::runner::{ProcessingReport, ProcessorStat, RunOutcome, Runner};

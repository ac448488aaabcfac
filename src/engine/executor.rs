use super::Engine;
use crate::context::{AnalysisContext, ExecutionContext};
use crate::core::Issue;
use crate::observability::{capture_panics, install_panic_hook, payload_message, take_captured_panic};
use std::any::Any;
use std::backtrace::Backtrace;
use std::panic::{self, AssertUnwindSafe};
use thiserror::Error;

/// Why an engine produced no issues.
#[derive(Debug, Error)]
pub enum EngineFailure {
    /// The engine returned an error.
    #[error("{cause:#}")]
    Reported {
        engine: String,
        cause: anyhow::Error,
    },

    /// The engine panicked with a [`DiagnosedPanic`] that already carries
    /// its own trace.
    #[error("panic: {message}")]
    DiagnosedPanic {
        engine: String,
        message: String,
        trace: String,
    },

    /// The engine panicked with an arbitrary payload.
    #[error("panic occurred: {message}")]
    Panicked {
        engine: String,
        message: String,
        trace: String,
    },
}

impl EngineFailure {
    pub fn engine(&self) -> &str {
        match self {
            Self::Reported { engine, .. }
            | Self::DiagnosedPanic { engine, .. }
            | Self::Panicked { engine, .. } => engine,
        }
    }

    pub fn is_panic(&self) -> bool {
        !matches!(self, Self::Reported { .. })
    }
}

/// Panic payload for failures whose trace was already reported.
///
/// Engines that run work on helper threads re-raise a helper's panic with
/// this payload so the executor does not print a second, less useful trace
/// of the re-raising thread.
#[derive(Debug, Clone)]
pub struct DiagnosedPanic {
    pub message: String,
    pub trace: String,
}

impl DiagnosedPanic {
    pub fn new(message: impl Into<String>, trace: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            trace: trace.into(),
        }
    }

    /// Capture the current backtrace alongside the message.
    pub fn here(message: impl Into<String>) -> Self {
        Self::new(message, Backtrace::force_capture().to_string())
    }

    pub fn raise(self) -> ! {
        panic::panic_any(self)
    }
}

/// Run one engine with panic isolation and provenance stamping.
///
/// Every returned issue has a non-empty `from_engine`.
pub fn run_engine_safe(
    engine: &dyn Engine,
    exec: &ExecutionContext,
    ctx: &AnalysisContext,
) -> Result<Vec<Issue>, EngineFailure> {
    install_panic_hook();

    let name = engine.name().to_string();
    let span = tracing::info_span!("engine", name = %name);
    let _entered = span.enter();

    let outcome = {
        let _scope = capture_panics();
        panic::catch_unwind(AssertUnwindSafe(|| engine.run(exec, ctx)))
    };

    match outcome {
        Ok(Ok(mut issues)) => {
            stamp_provenance(&mut issues, &name);
            log::debug!("Engine {} produced {} issues", name, issues.len());
            Ok(issues)
        }
        Ok(Err(cause)) => Err(EngineFailure::Reported { engine: name, cause }),
        Err(payload) => Err(classify_panic(name, payload)),
    }
}

fn stamp_provenance(issues: &mut [Issue], engine: &str) {
    for issue in issues.iter_mut().filter(|i| i.from_engine.is_empty()) {
        issue.from_engine = engine.to_string();
    }
}

fn classify_panic(engine: String, payload: Box<dyn Any + Send>) -> EngineFailure {
    let captured = take_captured_panic();

    match payload.downcast::<DiagnosedPanic>() {
        Ok(diagnosed) => {
            log::warn!("Panic in engine {}: {}", engine, diagnosed.message);
            log::debug!("Panic trace: {}", diagnosed.trace);
            EngineFailure::DiagnosedPanic {
                engine,
                message: diagnosed.message,
                trace: diagnosed.trace,
            }
        }
        Err(payload) => {
            let message = payload_message(payload.as_ref());
            let trace = match captured {
                Some(c) => match c.location {
                    Some(location) => format!("at {}\n{}", location, c.backtrace),
                    None => c.backtrace,
                },
                None => Backtrace::force_capture().to_string(),
            };
            log::warn!("Panic stack trace: {}", trace);
            EngineFailure::Panicked {
                engine,
                message,
                trace,
            }
        }
    }
}

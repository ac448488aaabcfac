//! Observability infrastructure for isolating and diagnosing failures.
//!
//! ## Features
//!
//! - **Panic capture**: panics raised inside an engine are recorded with
//!   their backtrace instead of being printed by the default hook
//! - **Stopwatch**: per-stage wall-clock accounting for a single run
//! - **Tracing**: subscriber setup bridging `log` records into spans
//!
//! ## Usage
//!
//! ```ignore
//! use lintmux::observability::{capture_panics, install_panic_hook, take_captured_panic};
//!
//! install_panic_hook();
//! let _scope = capture_panics();
//! let result = std::panic::catch_unwind(|| run_engine());
//! if result.is_err() {
//!     let details = take_captured_panic();
//! }
//! ```

pub mod panic_hook;
pub mod stopwatch;
pub mod tracing;

pub use panic_hook::{
    capture_panics, install_panic_hook, payload_message, take_captured_panic, CaptureGuard,
    CapturedPanic,
};
pub use stopwatch::{StageRecord, Stopwatch};
pub use self::tracing::init_tracing;

//! Core data types shared by engines, processors and the runner.

pub mod issue;

pub use issue::{Issue, LineRange, Position, Replacement};

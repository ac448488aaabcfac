//! Configuration for a lint run.
//!
//! Every switch consumed by the runner and its processors lives here and is
//! fixed when the runner is built. Nothing is read from the process
//! environment at run time.

mod core;
pub mod defaults;
mod loader;

pub use self::core::{Config, ExcludeRuleConfig, IssuesConfig, OutputConfig, PathMapping, RunConfig};
pub use defaults::{default_exclude_patterns, default_skip_dirs, DEFAULT_EXCLUDE_PATTERNS};
pub use loader::{
    directory_ancestors, find_config_file, load_config, load_config_from_path,
    parse_and_validate_config, CONFIG_FILE_NAME,
};

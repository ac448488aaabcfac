use crate::config::{load_config, load_config_from_path, Config};
use crate::context::{AnalysisContext, ExecutionContext};
use crate::core::Issue;
use crate::engine::{Engine, ReportEngine};
use crate::io::LineCache;
use crate::runner::Runner;
use anyhow::{Context as _, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per issue followed by its source
    Text,
    /// JSON array of issues
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "lintmux")]
#[command(about = "Run lint engines and merge their findings", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run engines and print the processed issues
    Run(RunArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Paths the user asked for; never skipped by directory exclusion
    pub paths: Vec<PathBuf>,

    /// Configuration file (defaults to the nearest .lintmux.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Report engines as NAME=PATH, each PATH holding a JSON array of issues
    #[arg(long = "report", value_name = "NAME=PATH")]
    pub reports: Vec<String>,

    /// Directory issue paths are made relative to
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Keep going when an engine fails
    #[arg(long = "no-fail-fast")]
    pub no_fail_fast: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

/// Load the configuration for a run, applying command-line overrides.
pub fn resolve_config(args: &RunArgs, cwd: PathBuf) -> Result<(Config, PathBuf)> {
    let mut config = match &args.config {
        Some(path) => load_config_from_path(path)?,
        None => load_config(&cwd)?,
    };

    let root = args
        .root
        .clone()
        .or_else(|| config.run.root.clone())
        .unwrap_or(cwd);
    if !args.paths.is_empty() {
        config.run.args = args.paths.clone();
    }
    if args.no_fail_fast {
        config.run.fail_fast = false;
    }
    Ok((config, root))
}

/// Run the report engines and print the surviving issues to stdout.
///
/// Returns whether any issue was reported.
pub fn run_command(args: RunArgs) -> Result<bool> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let (config, root) = resolve_config(&args, cwd)?;

    let engines = args
        .reports
        .iter()
        .map(|arg| ReportEngine::from_arg(arg).map(|e| Box::new(e) as Box<dyn Engine>))
        .collect::<Result<Vec<_>>>()?;
    let engine_names: Vec<String> = engines.iter().map(|e| e.name().to_string()).collect();

    let line_cache = Arc::new(LineCache::new(&root));
    let mut runner = Runner::new(&config, Arc::clone(&line_cache), &engine_names)?;
    let ctx = AnalysisContext::new(&root, Arc::new(config)).with_line_cache(line_cache);

    let outcome = runner.run(&engines, &ExecutionContext::new(), &ctx);

    print!("{}", render(&outcome.issues, args.format)?);

    if let Some(failure) = outcome.error {
        let engine = failure.engine().to_string();
        return Err(anyhow::Error::new(failure).context(format!(
            "Engine {engine} failed, rerun with --no-fail-fast to ignore engine errors"
        )));
    }
    Ok(!outcome.issues.is_empty())
}

pub fn render(issues: &[Issue], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(issues)?;
            out.push('\n');
            Ok(out)
        }
        OutputFormat::Text => {
            let mut out = String::new();
            for issue in issues {
                let pos = &issue.pos;
                match pos.column {
                    Some(column) => write!(out, "{}:{}:{}", pos.filename.display(), pos.line, column)?,
                    None => write!(out, "{}:{}", pos.filename.display(), pos.line)?,
                }
                writeln!(out, ": {} ({})", issue.text, issue.from_engine)?;
                for line in &issue.source_lines {
                    writeln!(out, "{line}")?;
                }
            }
            Ok(out)
        }
    }
}

use anyhow::Result;
use clap::Parser;
use lintmux::cli::{run_command, Cli, Commands};
use lintmux::observability::init_tracing;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => {
            init_tracing(args.verbosity);
            let found_issues = run_command(args)?;
            Ok(if found_issues {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
    }
}

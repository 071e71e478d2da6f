//! Windows bootstrap, without subcommand parsing.

use std::process::ExitCode;

use scanready::cli::{run_tool, Commands};

fn main() -> ExitCode {
    run_tool(Commands::BootstrapWindows)
}

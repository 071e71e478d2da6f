//! scanready CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use scanready::cli::{run, Cli};

fn main() -> ExitCode {
    run(Cli::parse())
}

//! Command-line interface for scanready.
//!
//! This module provides the CLI argument parsing using clap's derive macros,
//! command implementations and the shared entry point used by every binary.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations
//! - [`entry`] - Logging setup, UI selection and exit codes

pub mod args;
pub mod commands;
pub mod entry;

pub use args::{Cli, Commands, CompletionsArgs};
pub use commands::{Command, CommandDispatcher, CommandResult, ToolContext};
pub use entry::{run, run_tool};

//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. This allows:
//! - Single binary with subcommands (`scanready install`, `scanready verify`)
//! - Per-tool binaries that skip argument parsing
//! - Shared manifest, settings and provider loading

pub mod bootstrap;
pub mod completions;
pub mod dispatcher;
pub mod fix;
pub mod install;
pub mod verify;

pub use dispatcher::{Command, CommandDispatcher, CommandResult, ToolContext};

//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// scanready - Environment bootstrap for the PDF-to-Excel OCR converter.
#[derive(Debug, Parser)]
#[command(name = "scanready")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output (repeat to show errors only)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub quiet: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Install the Python packages for this platform and check the OCR engine
    Install,

    /// Set up a Windows machine, including the native OCR engine
    BootstrapWindows,

    /// Remove conflicting OCR packages and install compatible versions
    Fix,

    /// Check that the environment is ready to run the converter
    Verify,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_each_tool() {
        let cli = Cli::try_parse_from(["scanready", "install"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Install)));

        let cli = Cli::try_parse_from(["scanready", "bootstrap-windows"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::BootstrapWindows)));

        let cli = Cli::try_parse_from(["scanready", "fix"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Fix)));

        let cli = Cli::try_parse_from(["scanready", "verify"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Verify)));
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from(["scanready", "verify", "--quiet", "--no-color"]).unwrap();
        assert_eq!(cli.quiet, 1);
        assert!(cli.no_color);
        assert!(!cli.verbose);
    }

    #[test]
    fn quiet_can_repeat() {
        let cli = Cli::try_parse_from(["scanready", "-qq", "install"]).unwrap();
        assert_eq!(cli.quiet, 2);
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["scanready"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn completions_requires_known_shell() {
        let cli = Cli::try_parse_from(["scanready", "completions", "bash"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Completions(CompletionsArgs { shell: Shell::Bash }))
        ));
        assert!(Cli::try_parse_from(["scanready", "completions", "cmd"]).is_err());
    }
}

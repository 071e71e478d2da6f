//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use crate::cli::args::{Cli, Commands};
use crate::config::Settings;
use crate::error::Result;
use crate::manifest::Manifest;
use crate::platform::{provider_for, Platform, Provider};
use crate::ui::UserInterface;

use super::bootstrap::BootstrapCommand;
use super::completions::CompletionsCommand;
use super::fix::FixCommand;
use super::install::InstallCommand;
use super::verify::VerifyCommand;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// A command ran to completion and reported its findings.
    ///
    /// Problems the tool found were already printed, so the exit code
    /// stays 0 either way.
    pub fn reported(success: bool) -> Self {
        Self {
            success,
            exit_code: 0,
        }
    }
}

/// Shared inputs for the four tools.
pub struct ToolContext {
    pub manifest: Manifest,
    pub settings: Settings,
    pub provider: Box<dyn Provider>,
}

impl ToolContext {
    /// Load the embedded manifest and resolve settings for this host.
    pub fn load() -> Result<Self> {
        let manifest = Manifest::builtin()?;
        let settings = Settings::resolve(&manifest, Platform::current());
        let provider = provider_for(&settings);
        Ok(Self {
            manifest,
            settings,
            provider,
        })
    }

    /// Context around a fake provider, with no env overrides.
    #[cfg(test)]
    pub(crate) fn fake(provider: crate::platform::FakeProvider) -> Self {
        let manifest = Manifest::builtin().unwrap();
        let settings = Settings::resolve_with_env(&manifest, provider.platform(), |_| {
            Err(std::env::VarError::NotPresent)
        });
        Self {
            manifest,
            settings,
            provider: Box::new(provider),
        }
    }
}

/// Dispatches CLI commands to their implementations.
#[derive(Debug, Default)]
pub struct CommandDispatcher;

impl CommandDispatcher {
    pub fn new() -> Self {
        Self
    }

    /// Dispatch and execute a command.
    ///
    /// Without a subcommand, the verifier runs: it changes nothing and
    /// says what to do next.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let command = cli.command.clone().unwrap_or(Commands::Verify);
        self.dispatch_command(&command, ui)
    }

    /// Execute a single tool without parsing arguments.
    pub fn dispatch_command(
        &self,
        command: &Commands,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        match command {
            Commands::Install => InstallCommand::new(ToolContext::load()?).execute(ui),
            Commands::BootstrapWindows => BootstrapCommand::new(ToolContext::load()?).execute(ui),
            Commands::Fix => FixCommand::new(ToolContext::load()?).execute(ui),
            Commands::Verify => VerifyCommand::new(ToolContext::load()?).execute(ui),
            Commands::Completions(args) => CompletionsCommand::new(args.clone()).execute(ui),
        }
    }
}

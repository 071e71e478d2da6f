//! Shell completions generation.
//!
//! The `scanready completions` command prints a completion script for the
//! `scanready` binary. The per-tool binaries take no arguments and need none.

use std::io::Write;

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::{Cli, CompletionsArgs};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

const BIN_NAME: &str = "scanready";

/// The completions command implementation.
pub struct CompletionsCommand {
    args: CompletionsArgs,
}

impl CompletionsCommand {
    /// Create a new completions command.
    pub fn new(args: CompletionsArgs) -> Self {
        Self { args }
    }

    /// Write the completion script for `shell` to `out`.
    pub fn generate(shell: Shell, out: &mut dyn Write) {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, BIN_NAME, out);
    }
}

impl Command for CompletionsCommand {
    fn execute(&self, _ui: &mut dyn UserInterface) -> crate::error::Result<CommandResult> {
        let mut stdout = std::io::stdout().lock();
        Self::generate(self.args.shell, &mut stdout);
        stdout.flush()?;
        Ok(CommandResult::reported(true))
    }
}

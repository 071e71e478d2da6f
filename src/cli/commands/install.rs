//! The `scanready install` command.

use crate::requirements::run_install;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, ToolContext};

/// Installs the package plan for the detected platform.
pub struct InstallCommand {
    context: ToolContext,
}

impl InstallCommand {
    pub fn new(context: ToolContext) -> Self {
        Self { context }
    }
}

impl Command for InstallCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> crate::error::Result<CommandResult> {
        let ctx = &self.context;
        let report = run_install(&ctx.manifest, &ctx.settings, ctx.provider.as_ref(), ui);
        tracing::debug!(
            attempts = report.attempts(),
            failures = report.failures().len(),
            "Install finished"
        );
        Ok(CommandResult::reported(
            report.failures().is_empty() && report.binary.is_found(),
        ))
    }
}

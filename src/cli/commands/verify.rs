//! The `scanready verify` command.

use crate::requirements::run_verify;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, ToolContext};

/// Checks whether the converter can run here.
pub struct VerifyCommand {
    context: ToolContext,
}

impl VerifyCommand {
    pub fn new(context: ToolContext) -> Self {
        Self { context }
    }
}

impl Command for VerifyCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> crate::error::Result<CommandResult> {
        let ctx = &self.context;
        let report = run_verify(&ctx.manifest, &ctx.settings, ctx.provider.as_ref(), ui);
        let readiness = report.readiness();
        tracing::debug!(?readiness, "Verification finished");
        Ok(CommandResult::reported(readiness.overall()))
    }
}

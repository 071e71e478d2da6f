//! The `scanready bootstrap-windows` command.

use crate::requirements::{run_bootstrap, BootstrapReport};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, ToolContext};

/// Sets up a Windows machine end to end.
pub struct BootstrapCommand {
    context: ToolContext,
}

impl BootstrapCommand {
    pub fn new(context: ToolContext) -> Self {
        Self { context }
    }
}

impl Command for BootstrapCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> crate::error::Result<CommandResult> {
        let ctx = &self.context;
        let report = run_bootstrap(&ctx.manifest, &ctx.settings, ctx.provider.as_ref(), ui);
        if let BootstrapReport::WrongPlatform { platform } = &report {
            tracing::info!(%platform, "Bootstrap skipped on non-Windows host");
        }
        Ok(CommandResult::reported(report.success()))
    }
}

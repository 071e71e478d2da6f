//! The `scanready fix` command.

use crate::requirements::run_fix;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, ToolContext};

/// Removes conflicting OCR packages and reinstalls compatible pins.
pub struct FixCommand {
    context: ToolContext,
}

impl FixCommand {
    pub fn new(context: ToolContext) -> Self {
        Self { context }
    }
}

impl Command for FixCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> crate::error::Result<CommandResult> {
        let ctx = &self.context;
        let report = run_fix(&ctx.manifest, &ctx.settings, ctx.provider.as_ref(), ui);
        Ok(CommandResult::reported(report.is_clean()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{FakeProvider, Platform};
    use crate::ui::MockUI;

    #[test]
    fn absent_packages_are_not_failures() {
        let cmd = FixCommand::new(ToolContext::fake(
            FakeProvider::new(Platform::Linux)
                .absent_package("paddleocr")
                .absent_package("easyocr"),
        ));
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }
}

//! Interactive terminal UI.

use console::Term;
use std::io::Write;

use super::{NonInteractiveUI, OutputMode, ProgressSpinner, ScanreadyTheme, SpinnerHandle, UserInterface};

const BLOCK_RULE: &str = "└────────────────────────────────────";

/// Terminal UI with colors and spinners.
///
/// Results go to stdout; warnings and errors go to stderr.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: ScanreadyTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode, theme: ScanreadyTheme) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme,
            mode,
        }
    }

    fn line(&mut self, text: impl std::fmt::Display) {
        if self.mode.shows_status() {
            writeln!(self.out, "{}", text).ok();
        }
    }
}

impl UserInterface for TerminalUI {
    fn message(&mut self, msg: &str) {
        self.line(msg);
    }

    fn success(&mut self, msg: &str) {
        let text = self.theme.format_success(msg);
        self.line(text);
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.err, "{}", self.theme.format_warning(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if !self.mode.shows_spinners() {
            return Box::new(ProgressSpinner::hidden());
        }
        let spinner = ProgressSpinner::new(message, self.theme.clone());
        if self.mode.shows_details() {
            Box::new(spinner.with_elapsed())
        } else {
            Box::new(spinner)
        }
    }

    fn show_header(&mut self, title: &str) {
        let text = format!("\n{}\n", self.theme.format_header(title));
        self.line(text);
    }

    fn show_section(&mut self, title: &str) {
        let text = format!("\n{}", self.theme.format_section(title));
        self.line(text);
    }

    fn show_hint(&mut self, hint: &str) {
        if self.mode.shows_guidance() {
            writeln!(self.out, "  {}", self.theme.hint.apply_to(format!("💡 {}", hint))).ok();
        }
    }

    fn show_block(&mut self, title: &str, lines: &[String]) {
        if !self.mode.shows_guidance() {
            return;
        }
        let border = &self.theme.border;
        writeln!(
            self.out,
            "\n  {} {}",
            border.apply_to("┌─"),
            self.theme.highlight.apply_to(title)
        )
        .ok();
        for line in lines {
            writeln!(self.out, "  {} {}", border.apply_to("│"), line).ok();
        }
        writeln!(self.out, "  {}", border.apply_to(BLOCK_RULE)).ok();
    }
}

/// Pick the terminal UI when attached to a terminal and allowed to be
/// interactive, the plain line UI otherwise.
pub fn create_ui(interactive: bool, mode: OutputMode, theme: ScanreadyTheme) -> Box<dyn UserInterface> {
    if interactive && Term::stdout().is_term() {
        Box::new(TerminalUI::new(mode, theme))
    } else {
        Box::new(NonInteractiveUI::new(mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_ui_non_interactive_accepts_all_calls() {
        let mut ui = create_ui(false, OutputMode::Silent, ScanreadyTheme::plain());
        ui.show_header("Environment check");
        ui.start_spinner("Importing pandas").finish_success("pandas");
        ui.show_block("Next steps", &["1. Restart".to_string()]);
    }

    #[test]
    fn quiet_terminal_keeps_mode() {
        let ui = TerminalUI::new(OutputMode::Quiet, ScanreadyTheme::plain());
        assert_eq!(ui.mode, OutputMode::Quiet);
    }

    #[test]
    fn silent_terminal_hides_spinners() {
        let mut ui = TerminalUI::new(OutputMode::Silent, ScanreadyTheme::plain());
        let mut spinner = ui.start_spinner("Installing pandas");
        spinner.finish_success("Installed pandas");
    }
}

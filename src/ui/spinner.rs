//! Progress spinners.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};

use super::theme::ScanreadyTheme;
use super::SpinnerHandle;

/// A progress spinner shown while pip, an import check or the native
/// installer runs.
///
/// pip can sit silent for minutes on large wheels, so the spinner shows
/// elapsed time while it ticks and, optionally, on the result line.
pub struct ProgressSpinner {
    bar: ProgressBar,
    theme: ScanreadyTheme,
    started: Instant,
    show_elapsed: bool,
}

impl ProgressSpinner {
    /// Create a new spinner with a message.
    pub fn new(message: &str, theme: ScanreadyTheme) -> Self {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
            .template("  {spinner:.cyan} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(style);
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));

        Self {
            bar,
            theme,
            started: Instant::now(),
            show_elapsed: false,
        }
    }

    /// Create a spinner that doesn't draw anything.
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            theme: ScanreadyTheme::plain(),
            started: Instant::now(),
            show_elapsed: false,
        }
    }

    /// Append the elapsed time to the result line.
    pub fn with_elapsed(mut self) -> Self {
        self.show_elapsed = true;
        self
    }

    fn finish_with(&mut self, line: String) {
        let style = ProgressStyle::default_spinner()
            .template("  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        self.bar.set_style(style);
        let line = if self.show_elapsed {
            format!("{} {}", line, self.theme.dim.apply_to(elapsed_label(self.started.elapsed())))
        } else {
            line
        };
        self.bar.finish_with_message(line);
    }
}

/// `(0.4s)` below a minute, `(2m 05s)` above.
fn elapsed_label(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs < 60 {
        format!("({:.1}s)", elapsed.as_secs_f64())
    } else {
        format!("({}m {:02}s)", secs / 60, secs % 60)
    }
}

impl SpinnerHandle for ProgressSpinner {
    fn finish_success(&mut self, msg: &str) {
        let line = self.theme.format_success(msg);
        self.finish_with(line);
    }

    fn finish_error(&mut self, msg: &str) {
        let line = self.theme.format_error(msg);
        self.finish_with(line);
    }

    fn finish_skipped(&mut self, msg: &str) {
        let line = self.theme.format_skipped(msg);
        self.finish_with(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_spinner_finishes() {
        let mut spinner = ProgressSpinner::hidden();
        spinner.finish_success("Installed pandas");
        assert!(spinner.bar.is_finished());
        assert_eq!(spinner.bar.message(), "✓ Installed pandas");
    }

    #[test]
    fn hidden_spinner_finish_error_with_elapsed() {
        let mut spinner = ProgressSpinner::hidden().with_elapsed();
        spinner.finish_error("Failed to install paddleocr");
        assert!(spinner.bar.is_finished());
        assert!(spinner.bar.message().ends_with("s)"));
    }

    #[test]
    fn hidden_spinner_finish_skipped() {
        let mut spinner = ProgressSpinner::hidden();
        spinner.finish_skipped("easyocr was not removed");
        assert_eq!(spinner.bar.message(), "○ easyocr was not removed");
    }

    #[test]
    fn elapsed_label_formats() {
        assert_eq!(elapsed_label(Duration::from_millis(400)), "(0.4s)");
        assert_eq!(elapsed_label(Duration::from_secs(59)), "(59.0s)");
        assert_eq!(elapsed_label(Duration::from_secs(125)), "(2m 05s)");
    }
}

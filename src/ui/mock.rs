//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion, including how every spinner
//! finished.
//!
//! # Example
//!
//! ```
//! use scanready::ui::{MockUI, SpinnerStatus, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.message("Starting");
//! ui.start_spinner("Installing pandas").finish_success("pandas");
//!
//! assert!(ui.has_message("Starting"));
//! assert_eq!(
//!     ui.spinner_results(),
//!     vec![(SpinnerStatus::Success, "pandas".to_string())]
//! );
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use super::{SpinnerHandle, UserInterface};

type SpinnerLog = Rc<RefCell<Vec<(SpinnerStatus, String)>>>;

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    sections: Vec<String>,
    hints: Vec<String>,
    blocks: Vec<(String, Vec<String>)>,
    spinner_log: SpinnerLog,
}

impl MockUI {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Section titles, in order.
    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    /// Guidance blocks as (title, lines).
    pub fn blocks(&self) -> &[(String, Vec<String>)] {
        &self.blocks
    }

    /// How each spinner finished, in order.
    pub fn spinner_results(&self) -> Vec<(SpinnerStatus, String)> {
        self.spinner_log.borrow().clone()
    }

    /// Check if a header containing this text was shown.
    pub fn has_header(&self, title: &str) -> bool {
        self.headers.iter().any(|h| h.contains(title))
    }

    /// Check if a specific message was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific success was shown.
    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific warning was shown.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific error was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific hint was shown.
    pub fn has_hint(&self, msg: &str) -> bool {
        self.hints.iter().any(|m| m.contains(msg))
    }

    /// Check if a block with this title was shown.
    pub fn has_block(&self, title: &str) -> bool {
        self.blocks.iter().any(|(t, _)| t.contains(title))
    }

    /// Check if any block line contains this text.
    pub fn block_mentions(&self, text: &str) -> bool {
        self.blocks
            .iter()
            .any(|(_, lines)| lines.iter().any(|l| l.contains(text)))
    }

    /// Check if any spinner finished with this status and message.
    pub fn has_spinner_result(&self, status: SpinnerStatus, msg: &str) -> bool {
        self.spinner_log
            .borrow()
            .iter()
            .any(|(s, m)| *s == status && m.contains(msg))
    }
}

impl UserInterface for MockUI {
    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn start_spinner(&mut self, _message: &str) -> Box<dyn SpinnerHandle> {
        Box::new(MockSpinner {
            log: Rc::clone(&self.spinner_log),
        })
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn show_section(&mut self, title: &str) {
        self.sections.push(title.to_string());
    }

    fn show_hint(&mut self, hint: &str) {
        self.hints.push(hint.to_string());
    }

    fn show_block(&mut self, title: &str, lines: &[String]) {
        self.blocks.push((title.to_string(), lines.to_vec()));
    }
}

/// Status of a mock spinner when finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinnerStatus {
    Success,
    Error,
    Skipped,
}

/// Mock spinner that reports how it finished back to its [`MockUI`].
#[derive(Debug)]
pub struct MockSpinner {
    log: SpinnerLog,
}

impl SpinnerHandle for MockSpinner {
    fn finish_success(&mut self, msg: &str) {
        self.log
            .borrow_mut()
            .push((SpinnerStatus::Success, msg.to_string()));
    }

    fn finish_error(&mut self, msg: &str) {
        self.log
            .borrow_mut()
            .push((SpinnerStatus::Error, msg.to_string()));
    }

    fn finish_skipped(&mut self, msg: &str) {
        self.log
            .borrow_mut()
            .push((SpinnerStatus::Skipped, msg.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_basic_output() {
        let mut ui = MockUI::new();
        ui.message("hello");
        ui.success("done");
        ui.warning("careful");
        ui.error("broken");
        ui.show_header("Quick fix for OCR dependency conflicts");

        assert!(ui.has_message("hello"));
        assert!(ui.has_success("done"));
        assert!(ui.has_warning("careful"));
        assert!(ui.has_error("broken"));
        assert!(ui.has_header("Quick fix"));
    }

    #[test]
    fn captures_blocks_and_hints() {
        let mut ui = MockUI::new();
        ui.show_block("Manual install", &["brew install tesseract".to_string()]);
        ui.show_hint("Run scanready verify");

        assert!(ui.has_block("Manual install"));
        assert!(ui.block_mentions("brew install"));
        assert!(ui.has_hint("scanready verify"));
    }

    #[test]
    fn spinner_results_are_shared_with_ui() {
        let mut ui = MockUI::new();
        ui.start_spinner("a").finish_success("a ok");
        ui.start_spinner("b").finish_error("b failed");
        ui.start_spinner("c").finish_skipped("c absent");

        assert!(ui.has_spinner_result(SpinnerStatus::Error, "b failed"));
        assert_eq!(ui.spinner_results().len(), 3);
    }
}

//! Non-interactive UI for CI/headless environments.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use super::{OutputMode, SpinnerHandle, UserInterface};

/// Where plain output goes. Problems go to `err`, everything else to `out`.
struct Sinks {
    out: Box<dyn Write>,
    err: Box<dyn Write>,
}

impl Sinks {
    fn out(&mut self, line: &str) {
        writeln!(self.out, "{}", line).ok();
    }

    fn err(&mut self, line: &str) {
        writeln!(self.err, "{}", line).ok();
    }
}

/// Plain line-oriented output for pipes, logs and CI.
///
/// Spinners become a single result line. Warnings and errors are written
/// to stderr so they stay visible when stdout is redirected.
pub struct NonInteractiveUI {
    mode: OutputMode,
    sinks: Rc<RefCell<Sinks>>,
}

impl NonInteractiveUI {
    /// Create a UI writing to stdout and stderr.
    pub fn new(mode: OutputMode) -> Self {
        Self::with_writers(mode, Box::new(io::stdout()), Box::new(io::stderr()))
    }

    /// Create a UI writing to the given sinks.
    pub fn with_writers(mode: OutputMode, out: Box<dyn Write>, err: Box<dyn Write>) -> Self {
        Self {
            mode,
            sinks: Rc::new(RefCell::new(Sinks { out, err })),
        }
    }

    fn out(&self, line: &str) {
        self.sinks.borrow_mut().out(line);
    }

    fn err(&self, line: &str) {
        self.sinks.borrow_mut().err(line);
    }
}

impl UserInterface for NonInteractiveUI {
    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            self.out(msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            self.out(&format!("✓ {}", msg));
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            self.err(&format!("⚠ {}", msg));
        }
    }

    fn error(&mut self, msg: &str) {
        self.err(&format!("✗ {}", msg));
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_details() {
            self.out(&format!("  {}...", message));
        }
        Box::new(LineSpinner {
            mode: self.mode,
            sinks: Rc::clone(&self.sinks),
        })
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            self.out(&format!("\n{}\n{}", title, "=".repeat(title.chars().count())));
        }
    }

    fn show_section(&mut self, title: &str) {
        if self.mode.shows_status() {
            self.out(&format!("\n◆ {}", title));
        }
    }

    fn show_hint(&mut self, hint: &str) {
        if self.mode.shows_guidance() {
            self.out(&format!("  💡 {}", hint));
        }
    }

    fn show_block(&mut self, title: &str, lines: &[String]) {
        if !self.mode.shows_guidance() {
            return;
        }
        let mut sinks = self.sinks.borrow_mut();
        sinks.out(&format!("\n  ┌─ {}", title));
        for line in lines {
            sinks.out(&format!("  │ {}", line));
        }
        sinks.out("  └────────────────────────────────────");
    }
}

/// Prints the outcome of an operation as one line.
struct LineSpinner {
    mode: OutputMode,
    sinks: Rc<RefCell<Sinks>>,
}

impl SpinnerHandle for LineSpinner {
    fn finish_success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            self.sinks.borrow_mut().out(&format!("  ✓ {}", msg));
        }
    }

    fn finish_error(&mut self, msg: &str) {
        self.sinks.borrow_mut().err(&format!("  ✗ {}", msg));
    }

    fn finish_skipped(&mut self, msg: &str) {
        if self.mode.shows_status() {
            self.sinks.borrow_mut().out(&format!("  ○ {}", msg));
        }
    }
}

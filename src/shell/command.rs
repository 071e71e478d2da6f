//! Subprocess execution.
//!
//! Programs are spawned directly from an argv list, never through a shell,
//! so package specs like `numpy>=1.24.0` reach pip untouched.

use crate::error::{Result, ScanreadyError};
use std::collections::HashMap;
use std::io::{ErrorKind, Read};
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// How often a timed child is polled for exit.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Result of executing a program.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether the program succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }

    /// The most useful line to show when the program failed.
    ///
    /// pip and Python put the actual error last (`ERROR: ...`,
    /// `ModuleNotFoundError: ...`), so this is the last non-empty line of
    /// stderr, falling back to stdout and then to the exit code.
    pub fn failure_summary(&self) -> String {
        last_line(&self.stderr)
            .or_else(|| last_line(&self.stdout))
            .map(str::to_string)
            .unwrap_or_else(|| match self.exit_code {
                Some(code) => format!("exited with code {}", code),
                None => "terminated by signal".to_string(),
            })
    }

    /// Turn a non-zero exit into [`ScanreadyError::CommandFailed`].
    pub fn into_checked(self, command: &str) -> Result<Self> {
        if self.success {
            Ok(self)
        } else {
            Err(ScanreadyError::CommandFailed {
                command: command.to_string(),
                code: self.exit_code,
                message: self.failure_summary(),
            })
        }
    }
}

fn last_line(text: &str) -> Option<&str> {
    text.lines().rev().map(str::trim).find(|l| !l.is_empty())
}

/// Options for program execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Environment variables (merged with system env).
    pub env: HashMap<String, String>,

    /// Capture stdout (if false, inherits from parent).
    pub capture_stdout: bool,

    /// Capture stderr (if false, inherits from parent).
    pub capture_stderr: bool,

    /// Kill the program if it runs longer than this (None = wait forever).
    pub timeout: Option<Duration>,
}

impl CommandOptions {
    /// Capture both streams, no timeout.
    pub fn captured() -> Self {
        Self {
            capture_stdout: true,
            capture_stderr: true,
            ..Default::default()
        }
    }

    /// Capture both streams and give up after `timeout`.
    pub fn captured_with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            ..Self::captured()
        }
    }

    /// Inherit the terminal, for programs the operator interacts with.
    pub fn interactive() -> Self {
        Self::default()
    }

    /// Set one environment variable for the child.
    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.env.insert(key.to_string(), value.to_string());
        self
    }
}

/// Render an argv list for messages and logs.
pub fn display_command(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Execute a program and wait for it.
///
/// Spawn failures map to [`ScanreadyError::CommandNotFound`] when the
/// program does not exist; a run past `options.timeout` kills the child and
/// returns [`ScanreadyError::CommandTimedOut`]. A non-zero exit is not an
/// error here; check [`CommandResult::success`].
pub fn execute(program: &str, args: &[&str], options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();
    let command_line = display_command(program, args);
    tracing::debug!(command = %command_line, "Executing");

    let mut cmd = Command::new(program);
    cmd.args(args);

    for (key, value) in &options.env {
        cmd.env(key, value);
    }

    cmd.stdin(Stdio::inherit());
    cmd.stdout(if options.capture_stdout {
        Stdio::piped()
    } else {
        Stdio::inherit()
    });
    cmd.stderr(if options.capture_stderr {
        Stdio::piped()
    } else {
        Stdio::inherit()
    });

    let mut child = cmd.spawn().map_err(|e| match e.kind() {
        ErrorKind::NotFound => ScanreadyError::CommandNotFound {
            command: program.to_string(),
        },
        _ => ScanreadyError::Io(e),
    })?;

    // Drain pipes on their own threads so a chatty child cannot fill the
    // pipe buffer and stall before we notice it exited.
    let stdout_reader = child.stdout.take().map(spawn_reader);
    let stderr_reader = child.stderr.take().map(spawn_reader);

    let status = match options.timeout {
        Some(timeout) => match wait_with_deadline(&mut child, timeout)? {
            Some(status) => status,
            None => {
                tracing::debug!(command = %command_line, ?timeout, "Timed out; killing");
                let _ = child.kill();
                let _ = child.wait();
                return Err(ScanreadyError::CommandTimedOut {
                    command: command_line,
                    timeout,
                });
            }
        },
        None => child.wait()?,
    };

    let stdout = stdout_reader.map(join_reader).unwrap_or_default();
    let stderr = stderr_reader.map(join_reader).unwrap_or_default();
    let duration = start.elapsed();

    tracing::debug!(
        command = %command_line,
        code = ?status.code(),
        ?duration,
        "Finished"
    );

    if status.success() {
        Ok(CommandResult::success(stdout, stderr, duration))
    } else {
        Ok(CommandResult::failure(status.code(), stdout, stderr, duration))
    }
}

fn wait_with_deadline(
    child: &mut Child,
    timeout: Duration,
) -> Result<Option<std::process::ExitStatus>> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

fn spawn_reader<R: Read + Send + 'static>(mut stream: R) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = stream.read_to_end(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    })
}

fn join_reader(handle: JoinHandle<String>) -> String {
    handle.join().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    fn sh(script: &str) -> (&'static str, Vec<String>) {
        ("sh", vec!["-c".to_string(), script.to_string()])
    }

    #[cfg(unix)]
    fn run_sh(script: &str, options: &CommandOptions) -> Result<CommandResult> {
        let (program, args) = sh(script);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        execute(program, &args, options)
    }

    #[cfg(unix)]
    #[test]
    fn execute_successful_command() {
        let result = run_sh("echo hello", &CommandOptions::captured()).unwrap();

        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
        assert!(result.stdout.contains("hello"));
    }

    #[cfg(unix)]
    #[test]
    fn execute_failing_command() {
        let result = run_sh("echo 'ERROR: nope' >&2; exit 3", &CommandOptions::captured()).unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, Some(3));
        assert_eq!(result.failure_summary(), "ERROR: nope");
    }

    #[cfg(unix)]
    #[test]
    fn execute_with_env() {
        let options = CommandOptions::captured().with_env("PIP_DISABLE_PIP_VERSION_CHECK", "1");

        let result = run_sh("echo $PIP_DISABLE_PIP_VERSION_CHECK", &options).unwrap();

        assert_eq!(result.stdout.trim(), "1");
    }

    #[test]
    fn missing_program_is_command_not_found() {
        let err = execute(
            "scanready-definitely-not-installed",
            &["--version"],
            &CommandOptions::captured(),
        )
        .unwrap_err();
        assert!(matches!(err, ScanreadyError::CommandNotFound { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn timeout_kills_hanging_program() {
        let options = CommandOptions::captured_with_timeout(Duration::from_millis(200));
        let start = Instant::now();

        let err = run_sh("sleep 30", &options).unwrap_err();

        assert!(matches!(err, ScanreadyError::CommandTimedOut { .. }));
        assert!(start.elapsed() < Duration::from_secs(10));
    }

    #[cfg(unix)]
    #[test]
    fn timeout_does_not_affect_fast_program() {
        let options = CommandOptions::captured_with_timeout(Duration::from_secs(10));
        let result = run_sh("echo quick", &options).unwrap();
        assert!(result.success);
    }

    #[cfg(unix)]
    #[test]
    fn large_output_does_not_deadlock() {
        let options = CommandOptions::captured_with_timeout(Duration::from_secs(20));
        let result = run_sh("i=0; while [ $i -lt 20000 ]; do echo line$i; i=$((i+1)); done", &options)
            .unwrap();
        assert!(result.stdout.lines().count() >= 20000);
    }

    #[test]
    fn failure_summary_falls_back_to_exit_code() {
        let result = CommandResult::failure(Some(2), String::new(), "\n  \n".into(), Duration::ZERO);
        assert_eq!(result.failure_summary(), "exited with code 2");
    }

    #[test]
    fn into_checked_maps_failure() {
        let result = CommandResult::failure(Some(1), String::new(), "boom".into(), Duration::ZERO);
        let err = result.into_checked("pip install x").unwrap_err();
        match err {
            ScanreadyError::CommandFailed { command, code, message } => {
                assert_eq!(command, "pip install x");
                assert_eq!(code, Some(1));
                assert_eq!(message, "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn display_command_joins_argv() {
        assert_eq!(
            display_command("python3", &["-m", "pip", "install", "numpy>=1.24.0"]),
            "python3 -m pip install numpy>=1.24.0"
        );
    }
}

//! Native OCR binary probe.

use crate::config::BinaryProbeSettings;
use crate::error::ScanreadyError;
use crate::shell::{execute, CommandOptions};

/// Why the binary is considered unavailable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeFailure {
    /// Not on PATH.
    NotFound,
    /// Ran but exited non-zero.
    Failed { code: Option<i32>, message: String },
    /// Still running when the probe gave up; the child was killed.
    TimedOut,
}

impl std::fmt::Display for ProbeFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeFailure::NotFound => f.write_str("not found on PATH"),
            ProbeFailure::Failed { message, .. } => write!(f, "failed: {}", message),
            ProbeFailure::TimedOut => f.write_str("did not respond in time"),
        }
    }
}

/// Result of running `<binary> --version`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinaryProbe {
    /// Exit code 0; first line of the version output.
    Found { version: String },
    Missing(ProbeFailure),
}

impl BinaryProbe {
    pub fn is_found(&self) -> bool {
        matches!(self, BinaryProbe::Found { .. })
    }

    pub fn version(&self) -> Option<&str> {
        match self {
            BinaryProbe::Found { version } => Some(version),
            BinaryProbe::Missing(_) => None,
        }
    }
}

/// Run the binary with its version flag under the configured timeout.
pub fn probe_binary(binary: &BinaryProbeSettings) -> BinaryProbe {
    let options = CommandOptions::captured_with_timeout(binary.timeout);
    let probe = match execute(&binary.program, &[binary.version_flag.as_str()], &options) {
        Ok(result) if result.success => {
            // Older tesseract builds print the version on stderr.
            let version = first_line(&result.stdout)
                .or_else(|| first_line(&result.stderr))
                .unwrap_or(&binary.program)
                .to_string();
            BinaryProbe::Found { version }
        }
        Ok(result) => BinaryProbe::Missing(ProbeFailure::Failed {
            code: result.exit_code,
            message: result.failure_summary(),
        }),
        Err(ScanreadyError::CommandTimedOut { .. }) => BinaryProbe::Missing(ProbeFailure::TimedOut),
        Err(ScanreadyError::CommandNotFound { .. }) => BinaryProbe::Missing(ProbeFailure::NotFound),
        Err(e) => {
            tracing::debug!(program = %binary.program, "Probe could not start: {}", e);
            BinaryProbe::Missing(ProbeFailure::NotFound)
        }
    };
    tracing::debug!(program = %binary.program, ?probe, "Probed native binary");
    probe
}

fn first_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim).find(|l| !l.is_empty())
}

//! Per-step outcomes.

use crate::error::ScanreadyError;

/// What happened to one install, removal or check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    /// Did not happen, and that is fine (e.g. removing a package that was
    /// never installed).
    Benign { reason: String },
    /// Did not happen, and the operator needs to know.
    Failed { reason: String },
}

impl Outcome {
    /// Map a result whose failure must be reported.
    pub fn reportable(result: crate::error::Result<()>) -> Self {
        match result {
            Ok(()) => Outcome::Succeeded,
            Err(e) => Outcome::Failed {
                reason: reason_of(&e),
            },
        }
    }

    /// Map a result whose failure is expected and harmless.
    pub fn benign(result: crate::error::Result<()>) -> Self {
        match result {
            Ok(()) => Outcome::Succeeded,
            Err(e) => Outcome::Benign {
                reason: reason_of(&e),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded)
    }

    /// Whether this outcome counts against the run.
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Outcome::Succeeded => None,
            Outcome::Benign { reason } | Outcome::Failed { reason } => Some(reason),
        }
    }
}

/// Outcome of one package operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageOutcome {
    /// Requirement spec or distribution name the operation was for.
    pub package: String,
    pub outcome: Outcome,
}

impl PackageOutcome {
    pub fn new(package: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            package: package.into(),
            outcome,
        }
    }
}

/// The part of an error worth showing next to a package name.
///
/// For a failed subprocess that is the tool's own error line rather than
/// the full command.
pub fn reason_of(err: &ScanreadyError) -> String {
    match err {
        ScanreadyError::CommandFailed { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

/// Count outcomes that failed.
pub fn failure_count(outcomes: &[PackageOutcome]) -> usize {
    outcomes.iter().filter(|o| o.outcome.is_failure()).count()
}

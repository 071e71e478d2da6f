//! Subprocess execution and CI detection.

pub mod command;

pub use command::{display_command, execute, CommandOptions, CommandResult};

const CI_VARS: &[&str] = &["CI", "GITHUB_ACTIONS", "GITLAB_CI", "CIRCLECI", "TRAVIS", "JENKINS_URL"];

/// Check if running in a CI environment.
///
/// Spinners and colors are turned off there even when a pseudo-terminal
/// is attached.
pub fn is_ci() -> bool {
    CI_VARS.iter().any(|var| std::env::var_os(var).is_some())
}

//! pip and import checks through the target interpreter.
//!
//! Both providers drive pip the same way: `<python> -m pip ...` as an argv
//! list. Only the default interpreter name differs between platforms.

use crate::error::Result;
use crate::manifest::PackageRequirement;
use crate::shell::{display_command, execute, CommandOptions, CommandResult};

/// What `pip uninstall` did with a distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    Removed,
    /// pip skipped it; it was not installed to begin with.
    NotInstalled,
}

/// The interpreter whose environment is being prepared.
#[derive(Debug, Clone)]
pub struct Pip {
    python: String,
}

impl Pip {
    pub fn new(python: impl Into<String>) -> Self {
        Self {
            python: python.into(),
        }
    }

    /// `<python> -m pip install <spec>`
    pub fn install(&self, requirement: &PackageRequirement) -> Result<()> {
        let spec = requirement.to_string();
        self.run(&["-m", "pip", "install", &spec])?;
        Ok(())
    }

    /// `<python> -m pip uninstall <name> -y`
    ///
    /// pip exits 0 for a distribution that is not installed and only
    /// says so in a warning, so the output decides the [`Removal`].
    pub fn uninstall(&self, name: &str) -> Result<Removal> {
        let output = self.run(&["-m", "pip", "uninstall", name, "-y"])?;
        if skipped_as_absent(&output.stderr) || skipped_as_absent(&output.stdout) {
            tracing::debug!(package = name, "pip skipped uninstall, not installed");
            Ok(Removal::NotInstalled)
        } else {
            Ok(Removal::Removed)
        }
    }

    /// `<python> -c "import <module>"`
    pub fn import(&self, module: &str) -> Result<()> {
        let code = format!("import {}", module);
        self.run(&["-c", &code])?;
        Ok(())
    }

    /// `<python> -c "from <module> import <name>"`
    pub fn import_name(&self, module: &str, name: &str) -> Result<()> {
        let code = format!("from {} import {}", module, name);
        self.run(&["-c", &code])?;
        Ok(())
    }

    fn run(&self, args: &[&str]) -> Result<CommandResult> {
        let command = display_command(&self.python, args);
        // pip's upgrade notice would otherwise be the last stderr line.
        let options = CommandOptions::captured().with_env("PIP_DISABLE_PIP_VERSION_CHECK", "1");
        execute(&self.python, args, &options)?.into_checked(&command)
    }
}

/// `WARNING: Skipping easyocr as it is not installed.`
fn skipped_as_absent(output: &str) -> bool {
    output
        .lines()
        .any(|line| line.contains("Skipping") && line.contains("not installed"))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::error::ScanreadyError;
    use std::os::unix::fs::PermissionsExt;

    /// An interpreter stand-in that logs its argv and fails on request.
    fn fake_python(dir: &tempfile::TempDir, body: &str) -> String {
        let path = dir.path().join("python");
        let log = dir.path().join("calls.log");
        std::fs::write(
            &path,
            format!(
                "#!/bin/sh\necho \"$@\" >> '{}'\n{}\n",
                log.display(),
                body
            ),
        )
        .unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path.to_string_lossy().into_owned()
    }

    fn calls(dir: &tempfile::TempDir) -> Vec<String> {
        std::fs::read_to_string(dir.path().join("calls.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn install_passes_spec_unquoted() {
        let dir = tempfile::TempDir::new().unwrap();
        let pip = Pip::new(fake_python(&dir, "exit 0"));

        pip.install(&"numpy>=1.24.0".parse().unwrap()).unwrap();

        assert_eq!(calls(&dir), vec!["-m pip install numpy>=1.24.0"]);
    }

    #[test]
    fn uninstall_does_not_prompt() {
        let dir = tempfile::TempDir::new().unwrap();
        let pip = Pip::new(fake_python(&dir, "exit 0"));

        assert_eq!(pip.uninstall("easyocr").unwrap(), Removal::Removed);

        assert_eq!(calls(&dir), vec!["-m pip uninstall easyocr -y"]);
    }

    #[test]
    fn uninstall_of_absent_package_is_not_installed() {
        let dir = tempfile::TempDir::new().unwrap();
        let pip = Pip::new(fake_python(
            &dir,
            "echo 'WARNING: Skipping paddleocr as it is not installed.' >&2\nexit 0",
        ));

        assert_eq!(pip.uninstall("paddleocr").unwrap(), Removal::NotInstalled);
    }

    #[test]
    fn uninstall_failure_carries_pip_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let pip = Pip::new(fake_python(
            &dir,
            "echo 'ERROR: Cannot uninstall protobuf, RECORD file not found.' >&2\nexit 1",
        ));

        match pip.uninstall("protobuf").unwrap_err() {
            ScanreadyError::CommandFailed { message, .. } => {
                assert_eq!(message, "ERROR: Cannot uninstall protobuf, RECORD file not found.")
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn import_name_uses_from_import() {
        let dir = tempfile::TempDir::new().unwrap();
        let pip = Pip::new(fake_python(&dir, "exit 0"));

        pip.import_name("openai", "OpenAI").unwrap();

        assert_eq!(calls(&dir), vec!["-c from openai import OpenAI"]);
    }

    #[test]
    fn import_failure_carries_last_stderr_line() {
        let dir = tempfile::TempDir::new().unwrap();
        let pip = Pip::new(fake_python(
            &dir,
            "echo 'Traceback (most recent call last):' >&2\necho \"ModuleNotFoundError: No module named 'cv2'\" >&2\nexit 1",
        ));

        let err = pip.import("cv2").unwrap_err();

        match err {
            ScanreadyError::CommandFailed { message, .. } => {
                assert_eq!(message, "ModuleNotFoundError: No module named 'cv2'")
            }
            other => panic!("unexpected error: {}", other),
        }
        assert_eq!(calls(&dir), vec!["-c import cv2"]);
    }

    #[test]
    fn missing_interpreter_is_command_not_found() {
        let pip = Pip::new("scanready-no-such-python");
        assert!(matches!(
            pip.import("pandas"),
            Err(ScanreadyError::CommandNotFound { .. })
        ));
    }
}

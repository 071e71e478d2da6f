//! Error types for scanready operations.
//!
//! This module defines [`ScanreadyError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Tools never let these escape for documented failure conditions; they
//!   turn them into [`Outcome`](crate::requirements::Outcome) records
//! - `ScanreadyError` carries the detail that ends up in those records
//! - Use `anyhow::Error` (via `ScanreadyError::Other`) for unexpected errors

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Core error type for scanready operations.
#[derive(Debug, Error)]
pub enum ScanreadyError {
    /// An embedded manifest file is missing.
    #[error("Manifest not found: {path}")]
    ManifestNotFound { path: PathBuf },

    /// Failed to parse an embedded manifest.
    #[error("Failed to parse manifest {path}: {message}")]
    ManifestParse { path: PathBuf, message: String },

    /// A package spec string could not be parsed.
    #[error("Invalid package requirement '{spec}'")]
    InvalidRequirement { spec: String },

    /// The program to run does not exist on PATH.
    #[error("Command not found: {command}")]
    CommandNotFound { command: String },

    /// The program ran but exited unsuccessfully.
    #[error("Command failed with exit code {code:?}: {command}: {message}")]
    CommandFailed {
        command: String,
        code: Option<i32>,
        message: String,
    },

    /// The program did not finish within its time limit.
    #[error("Command timed out after {}s: {command}", timeout.as_secs())]
    CommandTimedOut { command: String, timeout: Duration },

    /// The operation needs a different operating system.
    #[error("{operation} is only supported on {required}")]
    UnsupportedPlatform {
        operation: String,
        required: String,
    },

    /// Fetching the native installer failed.
    #[error("Download failed for {url}: {message}")]
    DownloadFailed { url: String, message: String },

    /// Downloaded bytes do not match the expected digest.
    #[error("Checksum mismatch for {url}: expected {expected}, got {actual}")]
    IntegrityMismatch {
        url: String,
        expected: String,
        actual: String,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for scanready operations.
pub type Result<T> = std::result::Result<T, ScanreadyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_parse_displays_path_and_message() {
        let err = ScanreadyError::ManifestParse {
            path: PathBuf::from("manifests/packages.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("manifests/packages.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn command_failed_displays_command_and_message() {
        let err = ScanreadyError::CommandFailed {
            command: "python -m pip install numpy".into(),
            code: Some(1),
            message: "ERROR: No matching distribution".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("pip install numpy"));
        assert!(msg.contains("No matching distribution"));
        assert!(msg.contains("1"));
    }

    #[test]
    fn timed_out_displays_seconds() {
        let err = ScanreadyError::CommandTimedOut {
            command: "tesseract --version".into(),
            timeout: Duration::from_secs(10),
        };
        assert!(err.to_string().contains("10s"));
    }

    #[test]
    fn unsupported_platform_names_requirement() {
        let err = ScanreadyError::UnsupportedPlatform {
            operation: "Installer download".into(),
            required: "Windows".into(),
        };
        assert_eq!(
            err.to_string(),
            "Installer download is only supported on Windows"
        );
    }

    #[test]
    fn integrity_mismatch_shows_both_digests() {
        let err = ScanreadyError::IntegrityMismatch {
            url: "https://example.com/setup.exe".into(),
            expected: "aa".into(),
            actual: "bb".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("expected aa"));
        assert!(msg.contains("got bb"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: ScanreadyError = io_err.into();
        assert!(matches!(err, ScanreadyError::Io(_)));
    }
}

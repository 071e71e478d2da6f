//! Runtime settings.
//!
//! Settings start from the embedded manifest and the detected platform,
//! then environment variables override individual values:
//!
//! | Variable                      | Overrides                         |
//! |-------------------------------|-----------------------------------|
//! | `SCANREADY_PYTHON`            | interpreter that runs pip/imports |
//! | `SCANREADY_OCR_BINARY`        | native OCR binary name or path    |
//! | `SCANREADY_TESSERACT_URL`     | native installer download URL     |
//! | `SCANREADY_TESSERACT_SHA256`  | expected installer digest         |
//! | `SCANREADY_ENV_FILE`          | `.env` file holding the API key   |

use std::path::PathBuf;
use std::time::Duration;

use crate::manifest::Manifest;
use crate::platform::Platform;

pub const PYTHON_VAR: &str = "SCANREADY_PYTHON";
pub const OCR_BINARY_VAR: &str = "SCANREADY_OCR_BINARY";
pub const INSTALLER_URL_VAR: &str = "SCANREADY_TESSERACT_URL";
pub const INSTALLER_SHA256_VAR: &str = "SCANREADY_TESSERACT_SHA256";
pub const ENV_FILE_VAR: &str = "SCANREADY_ENV_FILE";

/// Where the native installer is fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallerSource {
    pub url: String,
    /// Lowercase hex SHA-256; `None` means the download is not verified.
    pub sha256: Option<String>,
    pub file_prefix: String,
    pub file_suffix: String,
}

/// How to reach the native OCR binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryProbeSettings {
    pub program: String,
    pub version_flag: String,
    pub timeout: Duration,
}

/// Settings shared by all tools for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub platform: Platform,
    pub python: String,
    pub binary: BinaryProbeSettings,
    pub installer: InstallerSource,
    pub env_file: PathBuf,
    pub credential_key: String,
}

impl Settings {
    /// Resolve settings from the manifest and the process environment.
    pub fn resolve(manifest: &Manifest, platform: Platform) -> Self {
        Self::resolve_with_env(manifest, platform, |key: &str| std::env::var(key))
    }

    /// Resolve settings with a custom env var lookup function.
    ///
    /// This allows testing without modifying actual environment variables.
    pub fn resolve_with_env<F>(manifest: &Manifest, platform: Platform, env_fn: F) -> Self
    where
        F: Fn(&str) -> Result<String, std::env::VarError>,
    {
        let lookup = |key: &str| env_fn(key).ok().filter(|v| !v.trim().is_empty());

        let python = lookup(PYTHON_VAR).unwrap_or_else(|| platform.default_python().to_string());

        let binary = BinaryProbeSettings {
            program: lookup(OCR_BINARY_VAR).unwrap_or_else(|| manifest.binary.name.clone()),
            version_flag: manifest.binary.version_flag.clone(),
            timeout: Duration::from_secs(manifest.binary.probe_timeout_secs),
        };

        let installer = InstallerSource {
            url: lookup(INSTALLER_URL_VAR).unwrap_or_else(|| manifest.installer.url.clone()),
            sha256: lookup(INSTALLER_SHA256_VAR).map(|s| s.trim().to_lowercase()),
            file_prefix: manifest.installer.file_prefix.clone(),
            file_suffix: manifest.installer.file_suffix.clone(),
        };

        let env_file = lookup(ENV_FILE_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(&manifest.credential.env_file));

        let settings = Self {
            platform,
            python,
            binary,
            installer,
            env_file,
            credential_key: manifest.credential.key.clone(),
        };
        tracing::debug!(?settings, "Resolved settings");
        settings
    }
}

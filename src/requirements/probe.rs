//! Credential presence check.
//!
//! The key is looked up in the process environment first, then in the
//! `.env` file. An empty value counts as missing. The value itself is never
//! returned, so it cannot end up in output.

use std::path::{Path, PathBuf};

use crate::config::DotEnv;

/// Where the credential was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    Environment,
    EnvFile(PathBuf),
}

/// Result of the credential check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialStatus {
    Present(CredentialSource),
    Missing,
}

impl CredentialStatus {
    pub fn is_present(&self) -> bool {
        matches!(self, CredentialStatus::Present(_))
    }
}

/// Check the environment (through `env_fn`), then `env_file`, for `key`.
pub fn check_credential_with_env<F>(key: &str, env_file: &Path, env_fn: F) -> CredentialStatus
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    if env_fn(key).is_ok_and(|v| !v.trim().is_empty()) {
        tracing::debug!(key, "Credential found in process environment");
        return CredentialStatus::Present(CredentialSource::Environment);
    }

    match DotEnv::load(env_file) {
        Ok(Some(env)) if env.has_value(key) => {
            tracing::debug!(key, file = %env_file.display(), "Credential found in env file");
            CredentialStatus::Present(CredentialSource::EnvFile(env_file.to_path_buf()))
        }
        Ok(_) => CredentialStatus::Missing,
        Err(e) => {
            tracing::warn!(file = %env_file.display(), "Could not read env file: {}", e);
            CredentialStatus::Missing
        }
    }
}

//! Contextual hints pointing at the next command to run.

/// After the installer finishes.
pub fn after_install() -> &'static str {
    "Run `scanready verify` to check the environment."
}

/// When the verifier found packages that do not import.
pub fn packages_missing() -> &'static str {
    "Run `scanready install` to install the missing packages."
}

/// When packages still fail after the quick fix.
pub fn after_failed_fix() -> &'static str {
    "Re-run `scanready fix`, or `scanready install` for a full reinstall."
}

/// When the credential is not set.
pub fn credential_missing(env_file: &str, key: &str) -> String {
    format!("Create a {} file containing: {}=your_api_key_here", env_file, key)
}

//! Download-then-run for the native OCR installer.
//!
//! The installer is written only after its checksum passes, into the
//! platform temp directory as a scoped [`tempfile::TempPath`]. It is
//! removed whether the run succeeds or fails.

use std::io::Write;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::config::InstallerSource;
use crate::error::{Result, ScanreadyError};

use super::http::HttpFetcher;

/// Hex-encoded SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes).as_slice())
}

/// Check downloaded bytes against the expected digest, if one is configured.
///
/// Returns `Ok(false)` when nothing was checked.
pub fn verify_digest(source: &InstallerSource, bytes: &[u8]) -> Result<bool> {
    let Some(expected) = &source.sha256 else {
        return Ok(false);
    };

    let actual = sha256_hex(bytes);
    if actual.eq_ignore_ascii_case(expected) {
        Ok(true)
    } else {
        Err(ScanreadyError::IntegrityMismatch {
            url: source.url.clone(),
            expected: expected.clone(),
            actual,
        })
    }
}

/// Download the installer, write it to a temp file and hand it to `run`.
///
/// `run` receives the path of the downloaded file; the file is deleted
/// when this function returns, whatever `run` did.
pub fn download_and_run<F>(fetcher: &HttpFetcher, source: &InstallerSource, run: F) -> Result<()>
where
    F: FnOnce(&Path) -> Result<()>,
{
    let bytes = fetcher
        .fetch_bytes(&source.url)
        .map_err(|e| ScanreadyError::DownloadFailed {
            url: source.url.clone(),
            message: format!("{:#}", e),
        })?;

    if verify_digest(source, &bytes)? {
        tracing::info!(url = %source.url, "Installer checksum verified");
    } else {
        tracing::warn!(
            url = %source.url,
            "Installer integrity not verified; set SCANREADY_TESSERACT_SHA256 to check it"
        );
    }

    let mut file = tempfile::Builder::new()
        .prefix(&source.file_prefix)
        .suffix(&source.file_suffix)
        .tempfile()?;
    file.write_all(&bytes)?;
    file.flush()?;

    // Close the handle so the installer can open the file on Windows.
    let path = file.into_temp_path();
    tracing::debug!(path = %path.display(), "Installer written");

    let result = run(&path);

    if let Err(e) = path.close() {
        tracing::warn!("Could not remove installer temp file: {}", e);
    }
    result
}

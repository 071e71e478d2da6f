//! HTTP downloads.
//!
//! Provides a blocking HTTP client for fetching the native OCR installer.
//! There is no request timeout: installers are large and the operator is
//! watching the terminal.

use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;

/// Fetches files over HTTP/HTTPS.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a new HTTP fetcher.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("scanready/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }

    /// Fetch the full body of a URL.
    pub fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!(url, "Fetching");
        let response = self.client.get(url).send()?;

        if !response.status().is_success() {
            bail!("HTTP {} fetching {}", response.status(), url);
        }

        let bytes = response.bytes()?;
        tracing::debug!(url, size = bytes.len(), "Fetched");
        Ok(bytes.to_vec())
    }
}

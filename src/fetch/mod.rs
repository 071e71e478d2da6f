//! Fetching the native OCR installer.

pub mod http;
pub mod installer;

pub use http::HttpFetcher;
pub use installer::{download_and_run, sha256_hex, verify_digest};

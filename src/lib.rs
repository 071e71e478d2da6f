//! scanready - Environment bootstrap and readiness checks for the
//! PDF-to-Excel OCR converter.
//!
//! Four tools prepare a machine to run the converter: a package installer,
//! a Windows bootstrap that also fetches the native OCR engine, a conflict
//! remediator for the protobuf clash between local OCR engines, and a
//! verifier that reports whether everything is in place.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Runtime settings and `.env` parsing
//! - [`error`] - Error types and result aliases
//! - [`fetch`] - Native installer download and integrity checks
//! - [`manifest`] - Embedded package tables
//! - [`platform`] - Host operations behind the [`Provider`](platform::Provider) trait
//! - [`requirements`] - The four tools and their reports
//! - [`shell`] - Subprocess execution
//! - [`ui`] - Spinners and terminal output
//!
//! # Example
//!
//! ```
//! use scanready::manifest::{Manifest, PlanKind};
//! use scanready::platform::Platform;
//!
//! let manifest = Manifest::builtin().unwrap();
//! let plan = manifest.plan(Platform::Windows.install_plan());
//! assert!(!plan.contains("paddleocr"));
//! assert!(manifest.plan(PlanKind::Default).contains("paddleocr"));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod manifest;
pub mod platform;
pub mod requirements;
pub mod shell;
pub mod ui;

pub use error::{Result, ScanreadyError};

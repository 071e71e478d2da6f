//! Runtime configuration.
//!
//! - [`settings`] resolves per-run settings from the manifest and env vars
//! - [`env_file`] reads `.env` files for the credential check
//!
//! # Example
//!
//! ```
//! use scanready::config::Settings;
//! use scanready::manifest::Manifest;
//! use scanready::platform::Platform;
//!
//! let manifest = Manifest::builtin().unwrap();
//! let settings = Settings::resolve_with_env(&manifest, Platform::Linux, |_| {
//!     Err(std::env::VarError::NotPresent)
//! });
//! assert_eq!(settings.python, "python3");
//! ```

pub mod env_file;
pub mod settings;

pub use env_file::DotEnv;
pub use settings::{BinaryProbeSettings, InstallerSource, Settings};

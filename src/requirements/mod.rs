//! The four tools.
//!
//! Each tool is one straight-line run over a [`Provider`](crate::platform::Provider)
//! that returns a structured report. Output goes through the
//! [`UserInterface`](crate::ui::UserInterface) as the run progresses, so
//! nothing here fails for the documented failure conditions.
//!
//! # Modules
//!
//! - [`installer`] - Package installer for the detected platform
//! - [`bootstrap`] - Windows bootstrap with native engine acquisition
//! - [`remediate`] - Conflict remediator (quick fix)
//! - [`verifier`] - Environment verifier and readiness verdict
//! - [`probe`] - Credential check
//! - [`outcome`] - Per-step outcomes

pub mod bootstrap;
pub mod installer;
pub mod instructions;
pub mod outcome;
pub mod probe;
pub mod remediate;
pub mod verifier;

pub use bootstrap::{run_bootstrap, BootstrapReport, EngineAcquisition};
pub use installer::{run_install, GroupReport, InstallReport};
pub use outcome::{Outcome, PackageOutcome};
pub use probe::{check_credential_with_env, CredentialSource, CredentialStatus};
pub use remediate::{run_fix, RemediationReport};
pub use verifier::{run_verify, Readiness, VerifyReport};

//! Platform detection and per-platform capabilities.
//!
//! Everything the tools do to the host goes through a [`Provider`]: pip
//! installs and removals, import checks, the native OCR binary probe and
//! the native installer download. One provider is chosen at startup by
//! [`provider_for`], so the tools themselves never branch on the OS name.
//!
//! # Example
//!
//! ```
//! use scanready::platform::{FakeProvider, Platform, Provider};
//!
//! let provider = FakeProvider::new(Platform::Linux).missing_module("easyocr");
//! assert!(provider.import_module("pandas").is_ok());
//! assert!(provider.import_module("easyocr").is_err());
//! ```

pub mod fake;
pub mod native;
pub mod pip;
pub mod unix;
pub mod windows;

use crate::config::{BinaryProbeSettings, InstallerSource, Settings};
use crate::error::Result;
use crate::manifest::{PackageRequirement, PlanKind};

pub use fake::{FakeProvider, ProviderCall};
pub use pip::Removal;
pub use native::{BinaryProbe, ProbeFailure};
pub use unix::UnixProvider;
pub use windows::WindowsProvider;

/// Operating system family the tools distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    MacOS,
    Linux,
    Windows,
}

impl Platform {
    /// Detect the current platform.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOS
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Linux
        }
    }

    pub fn is_windows(&self) -> bool {
        matches!(self, Platform::Windows)
    }

    /// Name shown to the operator.
    pub fn name(&self) -> &'static str {
        match self {
            Platform::MacOS => "macOS",
            Platform::Linux => "Linux",
            Platform::Windows => "Windows",
        }
    }

    /// Interpreter used when `SCANREADY_PYTHON` is unset.
    pub fn default_python(&self) -> &'static str {
        match self {
            Platform::Windows => "python",
            Platform::MacOS | Platform::Linux => "python3",
        }
    }

    /// The package installer's plan for this platform.
    ///
    /// Windows gets the reduced set without the local OCR engines.
    pub fn install_plan(&self) -> PlanKind {
        match self {
            Platform::Windows => PlanKind::Windows,
            Platform::MacOS | Platform::Linux => PlanKind::Default,
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Host operations the tools are built from.
pub trait Provider {
    /// Platform this provider acts on.
    fn platform(&self) -> Platform;

    /// Install (or upgrade in place) one requirement.
    fn install_package(&self, requirement: &PackageRequirement) -> Result<()>;

    /// Remove one distribution without prompting.
    ///
    /// A distribution that was never installed is not an error; it comes
    /// back as [`Removal::NotInstalled`].
    fn uninstall_package(&self, name: &str) -> Result<Removal>;

    /// Import a module in the target interpreter.
    fn import_module(&self, module: &str) -> Result<()>;

    /// Import one name from a module (`from <module> import <name>`).
    fn import_name(&self, module: &str, name: &str) -> Result<()>;

    /// Run the native OCR binary with its version flag.
    ///
    /// Never fails: every way the binary can be unavailable is a
    /// [`BinaryProbe::Missing`].
    fn probe_binary(&self, binary: &BinaryProbeSettings) -> BinaryProbe;

    /// Download the native engine installer and run it to completion.
    fn download_and_run_installer(&self, source: &InstallerSource) -> Result<()>;
}

/// Select the provider for the configured platform.
pub fn provider_for(settings: &Settings) -> Box<dyn Provider> {
    tracing::debug!(platform = %settings.platform, python = %settings.python, "Selecting provider");
    match settings.platform {
        Platform::Windows => Box::new(WindowsProvider::new(&settings.python)),
        other => Box::new(UnixProvider::new(other, &settings.python)),
    }
}

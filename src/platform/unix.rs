//! macOS and Linux provider.

use crate::config::{BinaryProbeSettings, InstallerSource};
use crate::error::{Result, ScanreadyError};
use crate::manifest::PackageRequirement;

use super::native::{self, BinaryProbe};
use super::pip::{Pip, Removal};
use super::{Platform, Provider};

/// Provider for macOS and Linux hosts.
///
/// The native engine comes from the system package manager there, so the
/// installer download is not available.
#[derive(Debug, Clone)]
pub struct UnixProvider {
    platform: Platform,
    pip: Pip,
}

impl UnixProvider {
    pub fn new(platform: Platform, python: &str) -> Self {
        Self {
            platform,
            pip: Pip::new(python),
        }
    }
}

impl Provider for UnixProvider {
    fn platform(&self) -> Platform {
        self.platform
    }

    fn install_package(&self, requirement: &PackageRequirement) -> Result<()> {
        self.pip.install(requirement)
    }

    fn uninstall_package(&self, name: &str) -> Result<Removal> {
        self.pip.uninstall(name)
    }

    fn import_module(&self, module: &str) -> Result<()> {
        self.pip.import(module)
    }

    fn import_name(&self, module: &str, name: &str) -> Result<()> {
        self.pip.import_name(module, name)
    }

    fn probe_binary(&self, binary: &BinaryProbeSettings) -> BinaryProbe {
        native::probe_binary(binary)
    }

    fn download_and_run_installer(&self, _source: &InstallerSource) -> Result<()> {
        Err(ScanreadyError::UnsupportedPlatform {
            operation: "Downloading the native OCR installer".to_string(),
            required: Platform::Windows.name().to_string(),
        })
    }
}

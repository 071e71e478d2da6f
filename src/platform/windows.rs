//! Windows provider.

use std::path::Path;

use crate::config::{BinaryProbeSettings, InstallerSource};
use crate::error::Result;
use crate::fetch::{download_and_run, HttpFetcher};
use crate::manifest::PackageRequirement;
use crate::shell::{execute, CommandOptions};

use super::native::{self, BinaryProbe};
use super::pip::{Pip, Removal};
use super::{Platform, Provider};

/// Provider for Windows hosts.
#[derive(Debug, Clone)]
pub struct WindowsProvider {
    pip: Pip,
}

impl WindowsProvider {
    pub fn new(python: &str) -> Self {
        Self {
            pip: Pip::new(python),
        }
    }
}

impl Provider for WindowsProvider {
    fn platform(&self) -> Platform {
        Platform::Windows
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

    fn download_and_run_installer(&self, source: &InstallerSource) -> Result<()> {
        let fetcher = HttpFetcher::new()?;
        download_and_run(&fetcher, source, run_installer)
    }
}

/// Run the installer attached to the terminal so the wizard can be used.
fn run_installer(path: &Path) -> Result<()> {
    let program = path.to_string_lossy();
    tracing::info!(installer = %program, "Running native installer");
    execute(&program, &[], &CommandOptions::interactive())?.into_checked(&program)?;
    Ok(())
}

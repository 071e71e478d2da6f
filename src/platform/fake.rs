//! In-memory provider for tests.
//!
//! Records every call and fails only where it was told to, so tool logic
//! can be exercised without pip, Python or a network.

use std::cell::RefCell;
use std::collections::HashSet;

use crate::config::{BinaryProbeSettings, InstallerSource};
use crate::error::{Result, ScanreadyError};
use crate::manifest::{normalize, PackageRequirement};

use super::native::{BinaryProbe, ProbeFailure};
use super::pip::Removal;
use super::{Platform, Provider};

/// A call made against a [`FakeProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCall {
    Install(String),
    Uninstall(String),
    Import(String),
    ImportName(String, String),
    ProbeBinary(String),
    DownloadInstaller(String),
}

/// Scriptable provider.
#[derive(Debug)]
pub struct FakeProvider {
    platform: Platform,
    failing_installs: HashSet<String>,
    absent_packages: HashSet<String>,
    failing_uninstalls: HashSet<String>,
    missing_modules: HashSet<String>,
    missing_names: HashSet<(String, String)>,
    binary: BinaryProbe,
    installer_error: Option<String>,
    calls: RefCell<Vec<ProviderCall>>,
}

impl FakeProvider {
    /// Everything succeeds and the binary is present.
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            failing_installs: HashSet::new(),
            absent_packages: HashSet::new(),
            failing_uninstalls: HashSet::new(),
            missing_modules: HashSet::new(),
            missing_names: HashSet::new(),
            binary: BinaryProbe::Found {
                version: "tesseract 5.3.3".to_string(),
            },
            installer_error: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// `pip install` of this distribution fails.
    pub fn failing_install(mut self, name: &str) -> Self {
        self.failing_installs.insert(normalize(name));
        self
    }

    /// The distribution is not installed; pip skips it and exits 0.
    pub fn absent_package(mut self, name: &str) -> Self {
        self.absent_packages.insert(normalize(name));
        self
    }

    /// `pip uninstall` of this distribution exits non-zero.
    pub fn failing_uninstall(mut self, name: &str) -> Self {
        self.failing_uninstalls.insert(normalize(name));
        self
    }

    /// Importing this module fails.
    pub fn missing_module(mut self, module: &str) -> Self {
        self.missing_modules.insert(module.to_string());
        self
    }

    /// The module imports but does not define `name`.
    pub fn missing_name(mut self, module: &str, name: &str) -> Self {
        self.missing_names.insert((module.to_string(), name.to_string()));
        self
    }

    /// The binary probe reports this failure.
    pub fn binary_missing(mut self, failure: ProbeFailure) -> Self {
        self.binary = BinaryProbe::Missing(failure);
        self
    }

    /// Downloading or running the installer fails with this message.
    pub fn installer_fails(mut self, message: &str) -> Self {
        self.installer_error = Some(message.to_string());
        self
    }

    /// Calls made so far, in order.
    pub fn calls(&self) -> Vec<ProviderCall> {
        self.calls.borrow().clone()
    }

    /// Number of install attempts made so far.
    pub fn install_count(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, ProviderCall::Install(_)))
            .count()
    }

    fn record(&self, call: ProviderCall) {
        self.calls.borrow_mut().push(call);
    }
}

fn pip_failure(command: String, message: String) -> ScanreadyError {
    ScanreadyError::CommandFailed {
        command,
        code: Some(1),
        message,
    }
}

impl Provider for FakeProvider {
    fn platform(&self) -> Platform {
        self.platform
    }

    fn install_package(&self, requirement: &PackageRequirement) -> Result<()> {
        let spec = requirement.to_string();
        self.record(ProviderCall::Install(spec.clone()));
        if self.failing_installs.contains(&normalize(&requirement.name)) {
            return Err(pip_failure(
                format!("pip install {}", spec),
                format!(
                    "ERROR: No matching distribution found for {}",
                    requirement.name
                ),
            ));
        }
        Ok(())
    }

    fn uninstall_package(&self, name: &str) -> Result<Removal> {
        self.record(ProviderCall::Uninstall(name.to_string()));
        let key = normalize(name);
        if self.failing_uninstalls.contains(&key) {
            return Err(pip_failure(
                format!("pip uninstall {} -y", name),
                format!("ERROR: Cannot uninstall {}, RECORD file not found.", name),
            ));
        }
        if self.absent_packages.contains(&key) {
            return Ok(Removal::NotInstalled);
        }
        Ok(Removal::Removed)
    }

    fn import_module(&self, module: &str) -> Result<()> {
        self.record(ProviderCall::Import(module.to_string()));
        if self.missing_modules.contains(module) {
            return Err(pip_failure(
                format!("python -c \"import {}\"", module),
                format!("ModuleNotFoundError: No module named '{}'", module),
            ));
        }
        Ok(())
    }

    fn import_name(&self, module: &str, name: &str) -> Result<()> {
        self.record(ProviderCall::ImportName(module.to_string(), name.to_string()));
        let command = format!("python -c \"from {} import {}\"", module, name);
        if self.missing_modules.contains(module) {
            return Err(pip_failure(
                command,
                format!("ModuleNotFoundError: No module named '{}'", module),
            ));
        }
        if self.missing_names.contains(&(module.to_string(), name.to_string())) {
            return Err(pip_failure(
                command,
                format!("ImportError: cannot import name '{}' from '{}'", name, module),
            ));
        }
        Ok(())
    }

    fn probe_binary(&self, binary: &BinaryProbeSettings) -> BinaryProbe {
        self.record(ProviderCall::ProbeBinary(binary.program.clone()));
        self.binary.clone()
    }

    fn download_and_run_installer(&self, source: &InstallerSource) -> Result<()> {
        self.record(ProviderCall::DownloadInstaller(source.url.clone()));
        match &self.installer_error {
            Some(message) => Err(ScanreadyError::DownloadFailed {
                url: source.url.clone(),
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

//! Windows bootstrap.
//!
//! Installs the Windows package set, removes the conflicting OCR engines
//! inline, then makes sure the native OCR engine is present, downloading
//! and running its installer when it is not.

use crate::config::Settings;
use crate::manifest::{Manifest, PlanKind};
use crate::platform::{BinaryProbe, Platform, Provider};
use crate::ui::{hints, UserInterface};

use super::installer::{install_groups, GroupReport};
use super::instructions;
use super::outcome::reason_of;
use super::remediate::{remediate, RemediationReport};

/// How the native OCR engine was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineAcquisition {
    AlreadyPresent { version: String },
    /// The installer ran to completion. The new PATH entry is only
    /// visible to shells started afterwards.
    Installed,
    Failed { reason: String },
}

impl EngineAcquisition {
    pub fn is_ready(&self) -> bool {
        !matches!(self, EngineAcquisition::Failed { .. })
    }
}

/// Everything the bootstrap did.
#[derive(Debug, Clone)]
pub enum BootstrapReport {
    /// Refused to run on a non-Windows host.
    WrongPlatform { platform: Platform },
    Completed {
        groups: Vec<GroupReport>,
        remediation: RemediationReport,
        engine: EngineAcquisition,
    },
}

impl BootstrapReport {
    /// Whether the bootstrap ran and the native engine is available.
    pub fn success(&self) -> bool {
        match self {
            BootstrapReport::WrongPlatform { .. } => false,
            BootstrapReport::Completed { engine, .. } => engine.is_ready(),
        }
    }
}

/// Probe for the native engine and run its installer if it is missing.
pub fn acquire_engine(
    provider: &dyn Provider,
    manifest: &Manifest,
    settings: &Settings,
    ui: &mut dyn UserInterface,
) -> EngineAcquisition {
    let display = &manifest.binary.display_name;
    ui.show_section(&format!("Checking if {} is already installed", display));

    if let BinaryProbe::Found { version } = provider.probe_binary(&settings.binary) {
        ui.success(&format!("{} is already installed ({})", display, version));
        return EngineAcquisition::AlreadyPresent { version };
    }

    ui.show_section(&format!("Downloading {} for Windows", display));
    ui.message(&format!("Source: {}", settings.installer.url));
    ui.show_block(
        "When the installation wizard opens",
        &instructions::installer_wizard(),
    );

    match provider.download_and_run_installer(&settings.installer) {
        Ok(()) => {
            ui.success(&format!("{} installation completed", display));
            ui.message("Restart your terminal/command prompt for PATH changes to take effect.");
            EngineAcquisition::Installed
        }
        Err(e) => {
            let reason = reason_of(&e);
            tracing::warn!("Native installer failed: {}", reason);
            ui.error(&format!("Failed to download/install {}: {}", display, reason));
            ui.show_block(
                "Manual installation",
                &instructions::installer_fallback(&manifest.installer.manual_url),
            );
            EngineAcquisition::Failed { reason }
        }
    }
}

/// Run the Windows bootstrap.
pub fn run_bootstrap(
    manifest: &Manifest,
    settings: &Settings,
    provider: &dyn Provider,
    ui: &mut dyn UserInterface,
) -> BootstrapReport {
    ui.show_header("Windows installation for PDF to Excel converter with OCR");

    let platform = provider.platform();
    if !platform.is_windows() {
        ui.error("This bootstrap is designed for Windows systems only.");
        ui.show_hint("Use `scanready install` on this system.");
        return BootstrapReport::WrongPlatform { platform };
    }

    let groups = install_groups(provider, &manifest.plan(PlanKind::Bootstrap).groups, ui);
    let remediation = remediate(provider, &manifest.bootstrap_fix, ui);
    let engine = acquire_engine(provider, manifest, settings, ui);

    ui.show_section("Summary");
    if engine.is_ready() {
        ui.success("Windows installation complete");
    } else {
        ui.warning("Windows installation finished without the native OCR engine");
    }
    ui.show_block(
        "Next steps",
        &instructions::next_steps(platform, &manifest.credential.env_file, &manifest.credential.key),
    );
    let (title, notes) = instructions::capability_notes(platform);
    ui.show_block(title, &notes);
    ui.show_hint(hints::after_install());

    BootstrapReport::Completed {
        groups,
        remediation,
        engine,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{FakeProvider, ProbeFailure, ProviderCall};
    use crate::requirements::Outcome;
    use crate::ui::MockUI;

    fn setup() -> (Manifest, Settings) {
        let manifest = Manifest::builtin().unwrap();
        let settings = Settings::resolve_with_env(&manifest, Platform::Windows, |_| {
            Err(std::env::VarError::NotPresent)
        });
        (manifest, settings)
    }

    #[test]
    fn refuses_to_run_off_windows() {
        let (manifest, settings) = setup();
        for platform in [Platform::Linux, Platform::MacOS] {
            let provider = FakeProvider::new(platform);
            let mut ui = MockUI::new();

            let report = run_bootstrap(&manifest, &settings, &provider, &mut ui);

            assert!(matches!(report, BootstrapReport::WrongPlatform { .. }));
            assert!(!report.success());
            assert!(provider.calls().is_empty());
            assert!(ui.has_error("Windows systems only"));
        }
    }

    #[test]
    fn present_engine_skips_download() {
        let (manifest, settings) = setup();
        let provider = FakeProvider::new(Platform::Windows);
        let mut ui = MockUI::new();

        let report = run_bootstrap(&manifest, &settings, &provider, &mut ui);

        assert!(report.success());
        match report {
            BootstrapReport::Completed { groups, engine, .. } => {
                assert_eq!(groups.len(), 3);
                assert_eq!(
                    engine,
                    EngineAcquisition::AlreadyPresent {
                        version: "tesseract 5.3.3".into()
                    }
                );
            }
            other => panic!("unexpected report: {:?}", other),
        }
        assert!(!provider
            .calls()
            .iter()
            .any(|c| matches!(c, ProviderCall::DownloadInstaller(_))));
    }

    #[test]
    fn steps_run_in_order() {
        let (manifest, settings) = setup();
        let provider = FakeProvider::new(Platform::Windows).binary_missing(ProbeFailure::NotFound);
        let mut ui = MockUI::new();

        run_bootstrap(&manifest, &settings, &provider, &mut ui);

        let calls = provider.calls();
        let packages = manifest.plan(PlanKind::Bootstrap).len();
        assert!(calls[..packages]
            .iter()
            .all(|c| matches!(c, ProviderCall::Install(_))));
        assert_eq!(calls[packages], ProviderCall::Uninstall("protobuf".into()));
        assert_eq!(
            calls[packages + 3],
            ProviderCall::Install("protobuf<=3.20.3".into())
        );
        assert_eq!(calls[packages + 4], ProviderCall::ProbeBinary("tesseract".into()));
        assert_eq!(
            calls[packages + 5],
            ProviderCall::DownloadInstaller(settings.installer.url.clone())
        );
    }

    #[test]
    fn missing_engine_is_installed() {
        let (manifest, settings) = setup();
        let provider = FakeProvider::new(Platform::Windows).binary_missing(ProbeFailure::TimedOut);
        let mut ui = MockUI::new();

        let engine = acquire_engine(&provider, &manifest, &settings, &mut ui);

        assert_eq!(engine, EngineAcquisition::Installed);
        assert!(ui.has_block("installation wizard"));
        assert!(ui.block_mentions("Add Tesseract to PATH"));
    }

    #[test]
    fn installer_failure_prints_fallback_and_returns() {
        let (manifest, settings) = setup();
        let provider = FakeProvider::new(Platform::Windows)
            .binary_missing(ProbeFailure::NotFound)
            .installer_fails("connection reset");
        let mut ui = MockUI::new();

        let report = run_bootstrap(&manifest, &settings, &provider, &mut ui);

        assert!(!report.success());
        match report {
            BootstrapReport::Completed { engine, .. } => assert!(matches!(
                engine,
                EngineAcquisition::Failed { ref reason } if reason.contains("connection reset")
            )),
            other => panic!("unexpected report: {:?}", other),
        }
        assert!(ui.has_error("Failed to download/install Tesseract OCR"));
        assert!(ui.has_block("Manual installation"));
        assert!(ui.block_mentions(&manifest.installer.manual_url));
    }

    #[test]
    fn inline_remediation_tolerates_absent_packages() {
        let (manifest, settings) = setup();
        let provider = FakeProvider::new(Platform::Windows)
            .absent_package("paddleocr")
            .absent_package("easyocr");
        let mut ui = MockUI::new();

        let report = run_bootstrap(&manifest, &settings, &provider, &mut ui);

        match report {
            BootstrapReport::Completed { remediation, .. } => {
                assert!(remediation.is_clean());
                assert!(matches!(remediation.removed[1].outcome, Outcome::Benign { .. }));
            }
            other => panic!("unexpected report: {:?}", other),
        }
    }
}

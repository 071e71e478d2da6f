//! Package installer.
//!
//! Installs the platform's package plan one requirement at a time, keeps
//! going past failures, then probes the native OCR binary and prints
//! manual install steps when it is unavailable.

use crate::config::Settings;
use crate::manifest::{Category, Manifest, PackageGroup, PackageRequirement, PlanKind};
use crate::platform::{BinaryProbe, Platform, Provider};
use crate::ui::{hints, UserInterface};

use super::instructions;
use super::outcome::{Outcome, PackageOutcome};

/// Outcomes for one package group.
#[derive(Debug, Clone)]
pub struct GroupReport {
    pub category: Category,
    pub title: String,
    pub outcomes: Vec<PackageOutcome>,
}

/// Everything the installer did.
#[derive(Debug, Clone)]
pub struct InstallReport {
    pub platform: Platform,
    pub plan: PlanKind,
    pub groups: Vec<GroupReport>,
    pub binary: BinaryProbe,
}

impl InstallReport {
    /// Every package outcome, in install order.
    pub fn outcomes(&self) -> impl Iterator<Item = &PackageOutcome> {
        self.groups.iter().flat_map(|g| g.outcomes.iter())
    }

    /// Number of install attempts made.
    pub fn attempts(&self) -> usize {
        self.outcomes().count()
    }

    /// Packages that failed to install.
    pub fn failures(&self) -> Vec<&PackageOutcome> {
        self.outcomes().filter(|o| o.outcome.is_failure()).collect()
    }
}

/// Install one requirement, reporting progress on a spinner.
pub fn install_requirement(
    provider: &dyn Provider,
    requirement: &PackageRequirement,
    ui: &mut dyn UserInterface,
) -> PackageOutcome {
    let spec = requirement.to_string();
    let mut spinner = ui.start_spinner(&format!("Installing {}", spec));
    let outcome = Outcome::reportable(provider.install_package(requirement));

    match &outcome {
        Outcome::Succeeded => spinner.finish_success(&format!("Installed {}", spec)),
        other => {
            let reason = other.reason().unwrap_or_default();
            tracing::warn!(package = %spec, "Install failed: {}", reason);
            spinner.finish_error(&format!("Failed to install {}: {}", spec, reason));
        }
    }
    PackageOutcome::new(spec, outcome)
}

/// Install each group in order. Every requirement is attempted once.
pub fn install_groups(
    provider: &dyn Provider,
    groups: &[PackageGroup],
    ui: &mut dyn UserInterface,
) -> Vec<GroupReport> {
    groups
        .iter()
        .map(|group| {
            ui.show_section(&group.title);
            let outcomes = group
                .packages
                .iter()
                .map(|requirement| install_requirement(provider, requirement, ui))
                .collect();
            GroupReport {
                category: group.category,
                title: group.title.clone(),
                outcomes,
            }
        })
        .collect()
}

/// Probe the native binary and show manual steps when it is unavailable.
///
/// Every kind of [`BinaryProbe::Missing`] is rendered the same way.
pub fn check_native_binary(
    provider: &dyn Provider,
    manifest: &Manifest,
    settings: &Settings,
    ui: &mut dyn UserInterface,
) -> BinaryProbe {
    let display = &manifest.binary.display_name;
    ui.show_section(&format!("Checking {}", display));

    let probe = provider.probe_binary(&settings.binary);
    match &probe {
        BinaryProbe::Found { version } => {
            ui.success(&format!("{} is installed and accessible ({})", display, version));
        }
        BinaryProbe::Missing(failure) => {
            tracing::debug!(program = %settings.binary.program, %failure, "Native binary unavailable");
            ui.warning(&format!("{} not found in PATH", display));
            ui.show_block(
                instructions::MANUAL_INSTALL_TITLE,
                &instructions::manual_install(provider.platform(), &manifest.installer.manual_url),
            );
        }
    }
    probe
}

/// Run the package installer for the provider's platform.
pub fn run_install(
    manifest: &Manifest,
    settings: &Settings,
    provider: &dyn Provider,
    ui: &mut dyn UserInterface,
) -> InstallReport {
    let platform = provider.platform();
    ui.show_header("Installing PDF to Excel converter with OCR");
    ui.message(&format!("Detected {} system", platform));
    if platform.is_windows() {
        ui.show_block("Windows", &instructions::windows_recommendation());
    }

    let plan = platform.install_plan();
    tracing::info!(?plan, packages = manifest.plan(plan).len(), "Installing packages");
    let groups = install_groups(provider, &manifest.plan(plan).groups, ui);
    let binary = check_native_binary(provider, manifest, settings, ui);

    let report = InstallReport {
        platform,
        plan,
        groups,
        binary,
    };
    render_summary(&report, manifest, ui);
    report
}

fn render_summary(report: &InstallReport, manifest: &Manifest, ui: &mut dyn UserInterface) {
    ui.show_section("Summary");
    let failures = report.failures();
    if failures.is_empty() {
        ui.success(&format!("Installed {} packages", report.attempts()));
    } else {
        let names: Vec<&str> = failures.iter().map(|f| f.package.as_str()).collect();
        ui.warning(&format!(
            "{} of {} packages failed: {}",
            failures.len(),
            report.attempts(),
            names.join(", ")
        ));
    }

    ui.show_block(
        "Next steps",
        &instructions::next_steps(
            report.platform,
            &manifest.credential.env_file,
            &manifest.credential.key,
        ),
    );
    let (title, notes) = instructions::capability_notes(report.platform);
    ui.show_block(title, &notes);
    ui.show_hint(hints::after_install());
}

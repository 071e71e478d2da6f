//! Conflict remediator.
//!
//! Removes the packages known to drag in an incompatible protobuf, then
//! installs pinned versions that work together. Nothing in the removal
//! phase counts against the run: a package that was never installed is
//! already fixed, and a removal pip refuses is shown with pip's reason.

use crate::config::Settings;
use crate::manifest::{Manifest, RemediationPlan};
use crate::platform::{Provider, Removal};
use crate::ui::{hints, UserInterface};

use super::installer::install_requirement;
use super::instructions;
use super::outcome::{failure_count, Outcome, PackageOutcome};

/// Everything the remediator did.
#[derive(Debug, Clone, Default)]
pub struct RemediationReport {
    /// Uninstall phase; failures here are [`Outcome::Benign`].
    pub removed: Vec<PackageOutcome>,
    /// Reinstall phase.
    pub reinstalled: Vec<PackageOutcome>,
    /// Import check of the cloud vision client, when the plan asks for one.
    pub client_import: Option<PackageOutcome>,
}

impl RemediationReport {
    /// Number of reportable failures across all phases.
    pub fn failure_count(&self) -> usize {
        failure_count(&self.removed)
            + failure_count(&self.reinstalled)
            + self
                .client_import
                .as_ref()
                .map_or(0, |o| usize::from(o.outcome.is_failure()))
    }

    pub fn is_clean(&self) -> bool {
        self.failure_count() == 0
    }
}

/// Remove one distribution; any failure is benign.
fn remove_package(provider: &dyn Provider, name: &str, ui: &mut dyn UserInterface) -> PackageOutcome {
    let mut spinner = ui.start_spinner(&format!("Removing {}", name));
    let outcome = match provider.uninstall_package(name) {
        Ok(Removal::Removed) => {
            spinner.finish_success(&format!("Removed {}", name));
            Outcome::Succeeded
        }
        Ok(Removal::NotInstalled) => {
            spinner.finish_skipped(&format!("{} was not installed", name));
            Outcome::Benign {
                reason: "not installed".to_string(),
            }
        }
        Err(e) => {
            let outcome = Outcome::benign(Err(e));
            let reason = outcome.reason().unwrap_or_default();
            tracing::debug!(package = name, reason, "Removal failed");
            spinner.finish_skipped(&format!("{} was not removed: {}", name, reason));
            outcome
        }
    };
    PackageOutcome::new(name, outcome)
}

/// Run both phases of `plan`, then the optional import check.
pub fn remediate(
    provider: &dyn Provider,
    plan: &RemediationPlan,
    ui: &mut dyn UserInterface,
) -> RemediationReport {
    ui.show_section("Removing conflicting packages");
    let removed = plan
        .uninstall
        .iter()
        .map(|name| remove_package(provider, name, ui))
        .collect();

    ui.show_section("Installing compatible packages");
    let reinstalled = plan
        .reinstall
        .iter()
        .map(|requirement| install_requirement(provider, requirement, ui))
        .collect();

    let client_import = plan.verify_import.as_ref().map(|check| {
        let module = &check.module;
        ui.show_section(&format!("Verifying the {} client", module));
        let outcome = Outcome::reportable(provider.import_name(module, &check.name));
        match &outcome {
            Outcome::Succeeded => ui.success(&format!("{} package is working", module)),
            other => ui.error(&format!(
                "{} package issue: {}",
                module,
                other.reason().unwrap_or_default()
            )),
        }
        PackageOutcome::new(module.as_str(), outcome)
    });

    RemediationReport {
        removed,
        reinstalled,
        client_import,
    }
}

/// Run the quick fix.
pub fn run_fix(
    manifest: &Manifest,
    settings: &Settings,
    provider: &dyn Provider,
    ui: &mut dyn UserInterface,
) -> RemediationReport {
    ui.show_header("Quick fix for OCR dependency conflicts");
    ui.show_block(
        "This will",
        &[
            "1. Remove the packages that conflict".to_string(),
            "2. Install compatible versions".to_string(),
            "3. Switch OCR to GPT-4 Vision".to_string(),
        ],
    );

    let report = remediate(provider, &manifest.quick_fix, ui);

    ui.show_section("Summary");
    if report.is_clean() {
        ui.success("Quick fix complete");
        ui.show_block("What changed", &instructions::fix_changes());
    } else {
        ui.warning(&format!(
            "Quick fix finished with {} problem(s)",
            report.failure_count()
        ));
        ui.show_hint(hints::after_failed_fix());
    }
    ui.show_block(
        "Next steps",
        &instructions::fix_next_steps(&settings.env_file.display().to_string()),
    );
    report
}

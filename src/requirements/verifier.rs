//! Environment verifier.
//!
//! Checks that every package imports, that the native OCR binary answers
//! its version flag and that the API key is configured, then prints a
//! verdict with hints aimed at whatever failed.

use crate::config::Settings;
use crate::manifest::{Category, ImportProbe, Manifest};
use crate::platform::{BinaryProbe, ProbeFailure, Provider};
use crate::ui::{hints, UserInterface};

use super::instructions;
use super::outcome::Outcome;
use super::probe::{check_credential_with_env, CredentialStatus};

/// Result of importing one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportCheck {
    pub name: String,
    pub module: String,
    pub outcome: Outcome,
}

/// Per-category readiness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Readiness {
    pub core: bool,
    pub ocr: bool,
    pub binary: bool,
    pub credential: bool,
}

impl Readiness {
    /// Ready only when every category is.
    pub fn overall(&self) -> bool {
        self.core && self.ocr && self.binary && self.credential
    }

    pub fn packages(&self) -> bool {
        self.core && self.ocr
    }
}

/// Everything the verifier found.
#[derive(Debug, Clone)]
pub struct VerifyReport {
    pub core: Vec<ImportCheck>,
    pub ocr: Vec<ImportCheck>,
    pub binary: BinaryProbe,
    pub credential: CredentialStatus,
}

impl VerifyReport {
    pub fn readiness(&self) -> Readiness {
        let all_ok = |checks: &[ImportCheck]| checks.iter().all(|c| c.outcome.is_success());
        Readiness {
            core: all_ok(&self.core),
            ocr: all_ok(&self.ocr),
            binary: self.binary.is_found(),
            credential: self.credential.is_present(),
        }
    }
}

/// Import each probe's module, rendering one line per package.
pub fn check_imports(
    provider: &dyn Provider,
    probes: &[ImportProbe],
    ui: &mut dyn UserInterface,
) -> Vec<ImportCheck> {
    probes
        .iter()
        .map(|probe| {
            let outcome = Outcome::reportable(provider.import_module(&probe.module));
            match &outcome {
                Outcome::Succeeded => ui.success(&probe.name),
                other => ui.error(&format!(
                    "{}: {}",
                    probe.name,
                    other.reason().unwrap_or_default()
                )),
            }
            ImportCheck {
                name: probe.name.clone(),
                module: probe.module.clone(),
                outcome,
            }
        })
        .collect()
}

/// Run the verifier against the process environment.
pub fn run_verify(
    manifest: &Manifest,
    settings: &Settings,
    provider: &dyn Provider,
    ui: &mut dyn UserInterface,
) -> VerifyReport {
    run_verify_with_env(manifest, settings, provider, ui, |key: &str| std::env::var(key))
}

/// Run the verifier with a custom env var lookup for the credential.
pub fn run_verify_with_env<F>(
    manifest: &Manifest,
    settings: &Settings,
    provider: &dyn Provider,
    ui: &mut dyn UserInterface,
    env_fn: F,
) -> VerifyReport
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    ui.show_header("Testing PDF to Excel converter installation");

    ui.show_section(Category::Core.label());
    let core = check_imports(provider, &manifest.core_probes, ui);

    ui.show_section(Category::Ocr.label());
    let ocr = check_imports(provider, &manifest.ocr_probes, ui);

    ui.show_section("System dependencies");
    let display = &manifest.binary.display_name;
    let binary = provider.probe_binary(&settings.binary);
    match &binary {
        BinaryProbe::Found { version } => ui.success(&format!("{}: {}", display, version)),
        BinaryProbe::Missing(ProbeFailure::Failed { .. }) => {
            ui.error(&format!("{}: Command failed", display))
        }
        BinaryProbe::Missing(ProbeFailure::NotFound | ProbeFailure::TimedOut) => {
            ui.error(&format!("{}: Not found in PATH", display))
        }
    }

    ui.show_section("Environment");
    let credential = check_credential_with_env(&settings.credential_key, &settings.env_file, env_fn);
    let label = &manifest.credential.description;
    if credential.is_present() {
        ui.success(&format!("{}: Found", label));
    } else {
        ui.error(&format!("{}: Not found", label));
    }

    let report = VerifyReport {
        core,
        ocr,
        binary,
        credential,
    };
    render_verdict(&report, manifest, settings, ui);
    report
}

fn render_verdict(
    report: &VerifyReport,
    manifest: &Manifest,
    settings: &Settings,
    ui: &mut dyn UserInterface,
) {
    let readiness = report.readiness();
    let display = &manifest.binary.display_name;

    ui.show_section("Installation summary");
    let mut line = |ok: bool, label: &str, good: &str, bad: &str| {
        if ok {
            ui.success(&format!("{}: {}", label, good));
        } else {
            ui.error(&format!("{}: {}", label, bad));
        }
    };
    line(readiness.core, Category::Core.label(), "All OK", "Some missing");
    line(readiness.ocr, Category::Ocr.label(), "All OK", "Some missing");
    line(readiness.binary, display.as_str(), "OK", "Missing");
    line(readiness.credential, "Environment", "OK", "Missing API key");

    if readiness.overall() {
        ui.success("Installation is complete and ready to use!");
        ui.message("Run the application with: streamlit run main.py");
        return;
    }

    ui.warning("Installation incomplete. Please fix the issues above.");
    if !readiness.packages() {
        ui.show_hint(hints::packages_missing());
    }
    if !readiness.binary {
        ui.show_block(
            &format!("Install {}", display),
            &instructions::binary_hints(&manifest.installer.manual_url),
        );
    }
    if !readiness.credential {
        ui.show_hint(&hints::credential_missing(
            &settings.env_file.display().to_string(),
            &settings.credential_key,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{FakeProvider, Platform};
    use crate::requirements::CredentialSource;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    struct Fixture {
        manifest: Manifest,
        settings: Settings,
        _dir: TempDir,
    }

    fn fixture() -> Fixture {
        let dir = TempDir::new().unwrap();
        let manifest = Manifest::builtin().unwrap();
        let mut settings = Settings::resolve_with_env(&manifest, Platform::Linux, |_| {
            Err(std::env::VarError::NotPresent)
        });
        settings.env_file = dir.path().join(".env");
        Fixture {
            manifest,
            settings,
            _dir: dir,
        }
    }

    fn no_env(_: &str) -> Result<String, std::env::VarError> {
        Err(std::env::VarError::NotPresent)
    }

    fn with_key(key: &str) -> Result<String, std::env::VarError> {
        if key == "OPENAI_API_KEY" {
            Ok("sk-test".to_string())
        } else {
            Err(std::env::VarError::NotPresent)
        }
    }

    fn verify(
        fx: &Fixture,
        provider: &FakeProvider,
        env_fn: fn(&str) -> Result<String, std::env::VarError>,
    ) -> (VerifyReport, MockUI) {
        let mut ui = MockUI::new();
        let report = run_verify_with_env(&fx.manifest, &fx.settings, provider, &mut ui, env_fn);
        (report, ui)
    }

    #[test]
    fn overall_is_and_of_all_four() {
        let all = Readiness {
            core: true,
            ocr: true,
            binary: true,
            credential: true,
        };
        assert!(all.overall());
        for flip in 0..4 {
            let mut r = all;
            match flip {
                0 => r.core = false,
                1 => r.ocr = false,
                2 => r.binary = false,
                _ => r.credential = false,
            }
            assert!(!r.overall(), "flipping input {} must flip readiness", flip);
        }
    }

    #[test]
    fn everything_present_is_ready() {
        let fx = fixture();
        let provider = FakeProvider::new(Platform::Linux);

        let (report, ui) = verify(&fx, &provider, with_key);

        assert!(report.readiness().overall());
        assert_eq!(
            report.credential,
            CredentialStatus::Present(CredentialSource::Environment)
        );
        assert!(ui.has_success("Installation is complete"));
        assert!(ui.hints().is_empty());
    }

    #[test]
    fn each_failing_input_flips_overall_readiness() {
        let fx = fixture();

        let (core, _) = verify(&fx, &FakeProvider::new(Platform::Linux).missing_module("fitz"), with_key);
        assert!(!core.readiness().core);
        assert!(!core.readiness().overall());

        let (ocr, _) = verify(&fx, &FakeProvider::new(Platform::Linux).missing_module("cv2"), with_key);
        assert!(ocr.readiness().core);
        assert!(!ocr.readiness().ocr);
        assert!(!ocr.readiness().overall());

        let (binary, _) = verify(
            &fx,
            &FakeProvider::new(Platform::Linux).binary_missing(ProbeFailure::NotFound),
            with_key,
        );
        assert!(!binary.readiness().binary);
        assert!(!binary.readiness().overall());

        let (credential, _) = verify(&fx, &FakeProvider::new(Platform::Linux), no_env);
        assert!(!credential.readiness().credential);
        assert!(!credential.readiness().overall());
    }

    #[test]
    fn core_packages_all_ok() {
        let mut fx = fixture();
        fx.manifest.core_probes = vec![
            ImportProbe {
                name: "pandas".into(),
                module: "pandas".into(),
            },
            ImportProbe {
                name: "numpy".into(),
                module: "numpy".into(),
            },
        ];
        let provider = FakeProvider::new(Platform::Linux);

        let (report, ui) = verify(&fx, &provider, with_key);

        assert_eq!(report.core.len(), 2);
        assert!(report.readiness().core);
        assert!(ui.has_success("Core packages: All OK"));
    }

    #[test]
    fn missing_import_shows_error_and_install_hint() {
        let fx = fixture();
        let provider = FakeProvider::new(Platform::Linux).missing_module("easyocr");

        let (_, ui) = verify(&fx, &provider, with_key);

        assert!(ui.has_error("easyocr: ModuleNotFoundError"));
        assert!(ui.has_error("OCR packages: Some missing"));
        assert!(ui.has_hint("scanready install"));
    }

    #[test]
    fn missing_credential_is_reported_with_hint() {
        let fx = fixture();
        let provider = FakeProvider::new(Platform::Linux);

        let (report, ui) = verify(&fx, &provider, no_env);

        assert_eq!(report.credential, CredentialStatus::Missing);
        assert!(!report.readiness().overall());
        assert!(ui.has_error("API Key: Not found"));
        assert!(ui.has_error("Environment: Missing API key"));
        assert!(ui.has_hint(".env"));
        assert!(ui.has_hint("OPENAI_API_KEY=your_api_key_here"));
    }

    #[test]
    fn credential_from_env_file_counts() {
        let fx = fixture();
        std::fs::write(&fx.settings.env_file, "OPENAI_API_KEY=sk-file\n").unwrap();
        let provider = FakeProvider::new(Platform::Linux);

        let (report, ui) = verify(&fx, &provider, no_env);

        assert!(report.readiness().credential);
        assert!(ui.has_success("OpenAI API Key: Found"));
    }

    #[test]
    fn credential_value_is_never_printed() {
        let fx = fixture();
        let provider = FakeProvider::new(Platform::Linux);

        let (_, ui) = verify(&fx, &provider, with_key);

        let everything = [ui.messages(), ui.successes(), ui.errors(), ui.warnings(), ui.hints()];
        assert!(everything.iter().all(|lines| lines.iter().all(|l| !l.contains("sk-test"))));
    }

    #[test]
    fn timed_out_binary_reads_like_missing_binary() {
        let fx = fixture();
        let timed_out = FakeProvider::new(Platform::Linux).binary_missing(ProbeFailure::TimedOut);
        let not_found = FakeProvider::new(Platform::Linux).binary_missing(ProbeFailure::NotFound);

        let (_, a) = verify(&fx, &timed_out, with_key);
        let (_, b) = verify(&fx, &not_found, with_key);

        assert_eq!(a.errors(), b.errors());
        assert_eq!(a.blocks(), b.blocks());
        assert!(a.has_error("Tesseract OCR: Not found in PATH"));
        assert!(a.block_mentions("brew install tesseract"));
    }

    #[test]
    fn broken_binary_reads_as_command_failed() {
        let fx = fixture();
        let provider = FakeProvider::new(Platform::Linux).binary_missing(ProbeFailure::Failed {
            code: Some(1),
            message: "error while loading shared libraries".into(),
        });

        let (_, ui) = verify(&fx, &provider, with_key);

        assert!(ui.has_error("Tesseract OCR: Command failed"));
    }

    #[test]
    fn found_binary_shows_version() {
        let fx = fixture();
        let provider = FakeProvider::new(Platform::Linux);

        let (report, ui) = verify(&fx, &provider, with_key);

        assert_eq!(report.binary.version(), Some("tesseract 5.3.3"));
        assert!(ui.has_success("Tesseract OCR: tesseract 5.3.3"));
    }
}

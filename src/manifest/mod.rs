//! Declarative package manifests.
//!
//! The package sets, the conflict fix, the import probes and the native
//! engine details are data, not code. They live as YAML under
//! `manifests/` and are embedded at compile time, so the lists can be
//! reviewed and diffed on their own.
//!
//! # Example
//!
//! ```
//! use scanready::manifest::{Manifest, PlanKind};
//!
//! let manifest = Manifest::builtin().unwrap();
//! let windows = manifest.plan(PlanKind::Windows);
//! assert!(windows.requirements().all(|r| !r.is_named("paddleocr")));
//! ```

pub mod requirement;

use std::path::Path;

use include_dir::{include_dir, Dir};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{Result, ScanreadyError};

pub use requirement::{normalize, Comparator, PackageRequirement, VersionConstraint};

/// Embedded manifests directory.
static MANIFESTS_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/manifests");

/// Manifest schema version this build understands.
pub const SUPPORTED_VERSION: u32 = 1;

/// What a group of packages is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Core,
    Image,
    Ocr,
    Compat,
}

impl Category {
    /// Label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Core => "Core packages",
            Self::Image => "Image processing packages",
            Self::Ocr => "OCR packages",
            Self::Compat => "Compatibility pins",
        }
    }
}

/// An ordered group of requirements installed under one banner.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageGroup {
    pub category: Category,
    pub title: String,
    pub packages: Vec<PackageRequirement>,
}

/// An ordered list of package groups.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct InstallPlan {
    pub groups: Vec<PackageGroup>,
}

impl InstallPlan {
    /// All requirements across groups, in install order.
    pub fn requirements(&self) -> impl Iterator<Item = &PackageRequirement> {
        self.groups.iter().flat_map(|g| g.packages.iter())
    }

    /// Number of requirements in the plan.
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.packages.len()).sum()
    }

    /// Whether the plan installs nothing.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether any group installs the named distribution.
    pub fn contains(&self, name: &str) -> bool {
        self.requirements().any(|r| r.is_named(name))
    }
}

/// Which install plan to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanKind {
    /// Reduced set for Windows, without the local OCR engines.
    Windows,
    /// Full set for every other OS.
    Default,
    /// Set installed by the Windows bootstrap.
    Bootstrap,
}

#[derive(Debug, Clone, Deserialize)]
struct PlansFile {
    version: u32,
    local_ocr_engines: Vec<String>,
    plans: Plans,
}

#[derive(Debug, Clone, Deserialize)]
struct Plans {
    windows: InstallPlan,
    default: InstallPlan,
    bootstrap: InstallPlan,
}

/// Packages to remove, then pinned packages to install.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemediationPlan {
    pub uninstall: Vec<String>,
    pub reinstall: Vec<PackageRequirement>,
    /// Import to check once the reinstall is done.
    #[serde(default)]
    pub verify_import: Option<NameImport>,
}

/// `from <module> import <name>`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NameImport {
    pub module: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
struct RemediationFile {
    version: u32,
    quick_fix: RemediationPlan,
    bootstrap: RemediationPlan,
}

/// A package the verifier tries to import.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImportProbe {
    /// Name shown to the operator.
    pub name: String,
    /// Module passed to `import`.
    #[serde(rename = "import")]
    pub module: String,
}

#[derive(Debug, Clone, Deserialize)]
struct VerifyFile {
    version: u32,
    core: Vec<ImportProbe>,
    ocr: Vec<ImportProbe>,
}

/// The native OCR binary and how to probe it.
#[derive(Debug, Clone, Deserialize)]
pub struct BinarySpec {
    pub name: String,
    pub version_flag: String,
    pub probe_timeout_secs: u64,
    pub display_name: String,
}

/// Where the Windows installer for the native engine comes from.
#[derive(Debug, Clone, Deserialize)]
pub struct InstallerSpec {
    pub url: String,
    pub file_prefix: String,
    pub file_suffix: String,
    pub manual_url: String,
}

/// The credential the cloud vision feature needs.
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialSpec {
    pub key: String,
    pub env_file: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
struct NativeFile {
    version: u32,
    binary: BinarySpec,
    installer: InstallerSpec,
    credential: CredentialSpec,
}

/// Every table the tools run from, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Manifest {
    pub local_ocr_engines: Vec<String>,
    windows: InstallPlan,
    default: InstallPlan,
    bootstrap: InstallPlan,
    pub quick_fix: RemediationPlan,
    pub bootstrap_fix: RemediationPlan,
    pub core_probes: Vec<ImportProbe>,
    pub ocr_probes: Vec<ImportProbe>,
    pub binary: BinarySpec,
    pub installer: InstallerSpec,
    pub credential: CredentialSpec,
}

impl Manifest {
    /// Load the manifests embedded in the binary.
    pub fn builtin() -> Result<Self> {
        let plans: PlansFile = load_embedded("packages.yml")?;
        let fixes: RemediationFile = load_embedded("remediation.yml")?;
        let probes: VerifyFile = load_embedded("verify.yml")?;
        let native: NativeFile = load_embedded("native.yml")?;

        check_version("packages.yml", plans.version)?;
        check_version("remediation.yml", fixes.version)?;
        check_version("verify.yml", probes.version)?;
        check_version("native.yml", native.version)?;

        tracing::debug!(
            windows = plans.plans.windows.len(),
            default = plans.plans.default.len(),
            bootstrap = plans.plans.bootstrap.len(),
            "Loaded package manifests"
        );

        Ok(Self {
            local_ocr_engines: plans.local_ocr_engines,
            windows: plans.plans.windows,
            default: plans.plans.default,
            bootstrap: plans.plans.bootstrap,
            quick_fix: fixes.quick_fix,
            bootstrap_fix: fixes.bootstrap,
            core_probes: probes.core,
            ocr_probes: probes.ocr,
            binary: native.binary,
            installer: native.installer,
            credential: native.credential,
        })
    }

    /// The install plan of the given kind.
    pub fn plan(&self, kind: PlanKind) -> &InstallPlan {
        match kind {
            PlanKind::Windows => &self.windows,
            PlanKind::Default => &self.default,
            PlanKind::Bootstrap => &self.bootstrap,
        }
    }
}

fn check_version(file: &str, version: u32) -> Result<()> {
    if version == SUPPORTED_VERSION {
        Ok(())
    } else {
        Err(ScanreadyError::ManifestParse {
            path: Path::new("manifests").join(file),
            message: format!(
                "unsupported manifest version {} (expected {})",
                version, SUPPORTED_VERSION
            ),
        })
    }
}

fn load_embedded<T: DeserializeOwned>(file: &str) -> Result<T> {
    let path = Path::new("manifests").join(file);
    let entry = MANIFESTS_DIR
        .get_file(file)
        .ok_or_else(|| ScanreadyError::ManifestNotFound { path: path.clone() })?;

    let content = entry
        .contents_utf8()
        .ok_or_else(|| ScanreadyError::ManifestParse {
            path: path.clone(),
            message: "Invalid UTF-8".to_string(),
        })?;

    parse_manifest(&path, content)
}

/// Parse manifest YAML, tagging errors with the file they came from.
pub fn parse_manifest<T: DeserializeOwned>(path: &Path, content: &str) -> Result<T> {
    serde_yaml::from_str(content).map_err(|e| ScanreadyError::ManifestParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

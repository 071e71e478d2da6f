//! Package requirement specs.
//!
//! A requirement is a distribution name plus an optional version
//! constraint, written the way pip accepts it on the command line:
//! `numpy`, `numpy>=1.24.0`, `protobuf<=3.20.3`.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::error::ScanreadyError;

static SPEC_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9][A-Za-z0-9._-]*)\s*(?:(===|>=|<=|==|!=|~=|>|<)\s*([A-Za-z0-9.*+!_-]+))?$")
        .expect("requirement pattern is valid")
});

static SEPARATOR_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-_.]+").expect("separator pattern is valid"));

/// Comparison operator in a version constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    AtLeast,
    AtMost,
    Greater,
    Less,
    Exact,
    Arbitrary,
    NotEqual,
    Compatible,
}

impl Comparator {
    fn parse(op: &str) -> Option<Self> {
        match op {
            ">=" => Some(Self::AtLeast),
            "<=" => Some(Self::AtMost),
            ">" => Some(Self::Greater),
            "<" => Some(Self::Less),
            "==" => Some(Self::Exact),
            "===" => Some(Self::Arbitrary),
            "!=" => Some(Self::NotEqual),
            "~=" => Some(Self::Compatible),
            _ => None,
        }
    }

    /// The operator as pip writes it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AtLeast => ">=",
            Self::AtMost => "<=",
            Self::Greater => ">",
            Self::Less => "<",
            Self::Exact => "==",
            Self::Arbitrary => "===",
            Self::NotEqual => "!=",
            Self::Compatible => "~=",
        }
    }
}

/// A version constraint such as `>=1.24.0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionConstraint {
    pub comparator: Comparator,
    pub version: String,
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.comparator.as_str(), self.version)
    }
}

/// A named dependency plus an optional version constraint.
///
/// # Example
///
/// ```
/// use scanready::manifest::PackageRequirement;
///
/// let req: PackageRequirement = "numpy>=1.24.0".parse().unwrap();
/// assert_eq!(req.name, "numpy");
/// assert_eq!(req.to_string(), "numpy>=1.24.0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct PackageRequirement {
    pub name: String,
    pub constraint: Option<VersionConstraint>,
}

impl PackageRequirement {
    /// Whether this names the given distribution, ignoring case and the
    /// `-`/`_`/`.` spelling differences pip normalizes away.
    pub fn is_named(&self, other: &str) -> bool {
        normalize(&self.name) == normalize(other)
    }
}

/// Normalize a distribution name the way pip compares them: lowercase,
/// with every run of `-`, `_` and `.` collapsed to one `-`.
pub fn normalize(name: &str) -> String {
    SEPARATOR_RUN
        .replace_all(&name.to_lowercase(), "-")
        .into_owned()
}

impl FromStr for PackageRequirement {
    type Err = ScanreadyError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let invalid = || ScanreadyError::InvalidRequirement {
            spec: spec.to_string(),
        };
        let caps = SPEC_REGEX.captures(spec.trim()).ok_or_else(invalid)?;

        let name = caps[1].to_string();
        let constraint = match (caps.get(2), caps.get(3)) {
            (Some(op), Some(version)) => Some(VersionConstraint {
                comparator: Comparator::parse(op.as_str()).ok_or_else(invalid)?,
                version: version.as_str().to_string(),
            }),
            _ => None,
        };

        Ok(Self { name, constraint })
    }
}

impl TryFrom<String> for PackageRequirement {
    type Error = ScanreadyError;

    fn try_from(spec: String) -> Result<Self, Self::Error> {
        spec.parse()
    }
}

impl fmt::Display for PackageRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.constraint {
            Some(c) => write!(f, "{}{}", self.name, c),
            None => f.write_str(&self.name),
        }
    }
}

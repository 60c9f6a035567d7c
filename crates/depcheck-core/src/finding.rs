//! Diagnostic findings produced by a manifest check.
//!
//! # JSON Contract
//!
//! Each finding serializes with required keys `{ "code", "severity", "message" }`
//! and may include `{ "section", "package" }`. No other keys.
//!
//! Findings are never re-sorted after they are produced; the check emits them
//! in a fixed order (shape, then duplicates, then installs).

use serde::Serialize;

use crate::manifest::SectionKind;

/// Finding codes.
pub mod codes {
    pub const MANIFEST_INVALID_JSON: &str = "MANIFEST_INVALID_JSON";
    pub const MANIFEST_NOT_OBJECT: &str = "MANIFEST_NOT_OBJECT";
    pub const SECTION_NOT_OBJECT: &str = "SECTION_NOT_OBJECT";
    pub const SPECIFIER_NOT_STRING: &str = "SPECIFIER_NOT_STRING";
    pub const DUPLICATE_DEPENDENCY: &str = "DUPLICATE_DEPENDENCY";
    pub const DUPLICATE_DEPENDENCY_VERSION_MISMATCH: &str =
        "DUPLICATE_DEPENDENCY_VERSION_MISMATCH";
    pub const PACKAGE_NOT_INSTALLED: &str = "PACKAGE_NOT_INSTALLED";
}

/// Severity levels for findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warn,
    Error,
}

impl Severity {
    /// Convert to string for JSON serialization.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl Serialize for Severity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// A single diagnostic finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Stable finding code.
    pub code: String,
    /// Severity level.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// Dependency section the finding is keyed to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Package name when relevant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
}

impl Finding {
    /// Create a new finding.
    #[must_use]
    pub fn new(code: &str, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            severity,
            message: message.into(),
            section: None,
            package: None,
        }
    }

    /// Set the section field.
    #[must_use]
    pub fn with_section(mut self, section: SectionKind) -> Self {
        self.section = Some(section.as_str().to_string());
        self
    }

    /// Set the package field.
    #[must_use]
    pub fn with_package(mut self, pkg: impl Into<String>) -> Self {
        self.package = Some(pkg.into());
        self
    }

    /// The manifest text could not be parsed.
    #[must_use]
    pub fn invalid_json(detail: &str) -> Self {
        Self::new(
            codes::MANIFEST_INVALID_JSON,
            Severity::Error,
            format!("The package.json file is not valid JSON: {detail}"),
        )
    }

    /// The manifest parsed, but its root is not an object.
    #[must_use]
    pub fn not_object() -> Self {
        Self::new(
            codes::MANIFEST_NOT_OBJECT,
            Severity::Error,
            "The package.json file should contain a JSON object",
        )
    }

    /// A dependency section is present but is not an object.
    #[must_use]
    pub fn section_not_object(section: SectionKind) -> Self {
        Self::new(
            codes::SECTION_NOT_OBJECT,
            section.shape_severity(),
            format!(
                "The {} property should be an object if present",
                section.as_str()
            ),
        )
        .with_section(section)
    }

    /// An entry inside a section has a non-string version specifier.
    #[must_use]
    pub fn specifier_not_string(section: SectionKind, name: &str) -> Self {
        Self::new(
            codes::SPECIFIER_NOT_STRING,
            section.shape_severity(),
            format!(
                "{}: The version specifier of {name} should be a string",
                section.as_str()
            ),
        )
        .with_section(section)
        .with_package(name)
    }

    /// A secondary section repeats a package from the primary section.
    ///
    /// `mismatch` carries the `(primary, secondary)` specifiers when they are
    /// not equivalent. The message lists the `dependencies` specifier first:
    /// `(<dependencies spec> vs. <secondary spec>)`.
    #[must_use]
    pub fn duplicate(section: SectionKind, name: &str, mismatch: Option<(&str, &str)>) -> Self {
        let base = format!(
            "{}: The package {name} was already listed in the {} section",
            section.as_str(),
            SectionKind::Dependencies.as_str()
        );
        let (code, message) = match mismatch {
            None => (codes::DUPLICATE_DEPENDENCY, base),
            Some((primary, secondary)) => (
                codes::DUPLICATE_DEPENDENCY_VERSION_MISMATCH,
                format!("{base}, and with a different version specifier ({primary} vs. {secondary})"),
            ),
        };
        Self::new(code, Severity::Warn, message)
            .with_section(section)
            .with_package(name)
    }

    /// An enforced dependency is missing from the installed snapshot.
    #[must_use]
    pub fn not_installed(section: SectionKind, name: &str, specifier: &str) -> Self {
        Self::new(
            codes::PACKAGE_NOT_INSTALLED,
            Severity::Error,
            format!("Package {name} is not installed (expected version: {specifier})."),
        )
        .with_section(section)
        .with_package(name)
    }
}
